//! FFI type definitions and handle types

use crate::buffers::RawBuffer;
use crate::error::RefbufError;

/// Buffer handle for the C API: a pointer to the intrusive header.
///
/// C callers treat it as opaque and pass it back to the `refbuf_*`
/// functions; they never dereference it.
pub type RefbufBufferHandle = *mut RawBuffer;

/// Error codes for C API
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefbufErrorCode {
    Success = 0,
    InvalidParameter = 1,
    AllocationFailed = 2,
}

impl From<RefbufError> for RefbufErrorCode {
    fn from(error: RefbufError) -> Self {
        match error {
            RefbufError::AllocationFailed { .. } => RefbufErrorCode::AllocationFailed,
            RefbufError::InvalidParameter { .. } => RefbufErrorCode::InvalidParameter,
        }
    }
}

/// Buffer accounting counters (C-compatible)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RefbufStats {
    pub buffers_created: u64,
    pub buffers_destroyed: u64,
    pub live_payload_bytes: usize,
}
