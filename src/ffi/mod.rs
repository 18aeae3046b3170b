//! C Foreign Function Interface (FFI) for C/C++ integration
//!
//! A minimal C-compatible surface over the buffer primitive. The handle
//! a C caller holds is the raw header pointer itself: the intrusive
//! layout means no registry or side table is needed, and acquire/release
//! act directly on the pointed-to block.

pub mod buffers;
pub mod types;

// Re-export commonly used types and functions
pub use types::{RefbufBufferHandle, RefbufErrorCode, RefbufStats};

pub use buffers::{
    refbuf_acquire, refbuf_create, refbuf_data, refbuf_ref_count, refbuf_release, refbuf_size,
    refbuf_stats,
};
