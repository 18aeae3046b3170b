//! Reference-counted shared byte buffers
//!
//! The buffer primitive for passing raw byte payloads between components
//! without copying: an atomically counted, fixed-size payload living in a
//! single allocation together with its header.

pub mod handle;
pub mod raw;
pub mod stats;

// Re-export main types
pub use handle::DataBuffer;
pub use raw::{RawBuffer, HEADER_SIZE};
pub use stats::{global_stats, BufferStats};
