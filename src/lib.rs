//! # Refbuf - Reference-Counted Shared Byte Buffers
//!
//! Refbuf provides a single primitive: a variable-length binary buffer
//! shared between components by handle, without copying. A buffer is one
//! contiguous allocation holding an atomic reference count, an immutable
//! size, and the payload bytes inline. There is no detached control
//! block and no second allocation.
//!
//! ## Features
//!
//! - **Single-allocation layout**: header and payload share one heap block
//! - **Wait-free sharing**: acquire/release are single atomic operations
//! - **Interchangeable handles**: the last handle dropped frees the block,
//!   whichever thread holds it
//! - **Fatal invariant checks**: over-release and use-after-destroy abort
//!   loudly instead of corrupting shared state
//! - **C API**: stable `refbuf_*` surface behind the `c-api` feature
//! - **Model checked**: refcount lifecycle verified under loom
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────┬──────────────────┬─────────────────────────┐
//! │ ref_count: i64   │ size: usize      │ payload: `size` bytes   │
//! └──────────────────┴──────────────────┴─────────────────────────┘
//!         8 bytes           8 bytes          fixed at creation
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use refbuf::DataBuffer;
//!
//! let mut buffer = DataBuffer::new(1024)?;
//! buffer.as_mut_slice()[..5].copy_from_slice(b"hello");
//!
//! // Hand a clone to another component; both see the same bytes.
//! let shared = buffer.clone();
//! assert_eq!(&shared.as_slice()[..5], b"hello");
//! assert_eq!(shared.ref_count(), 2);
//!
//! // The buffer is freed when the last handle drops.
//! drop(buffer);
//! drop(shared);
//! # Ok::<(), refbuf::RefbufError>(())
//! ```
//!
//! Payload contents are unsynchronized: callers sharing a
//! buffer across threads while mutating it must impose their own
//! discipline (single-writer-then-freeze is the usual pattern).

// Core modules
pub mod buffers;
pub mod error;

pub(crate) mod sync;

#[cfg(feature = "c-api")]
pub mod ffi;


// Main API re-exports
pub use buffers::{global_stats, BufferStats, DataBuffer, RawBuffer, HEADER_SIZE};
pub use error::{RefbufError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;
