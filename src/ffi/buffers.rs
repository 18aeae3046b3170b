//! FFI functions for buffer lifecycle and access

use std::ptr::NonNull;

use crate::buffers::{global_stats, RawBuffer};

use super::types::{RefbufBufferHandle, RefbufErrorCode, RefbufStats};

/// Create a buffer with `size` zero-filled payload bytes.
///
/// On success the handle written to `handle` already holds one
/// reference; balance it with `refbuf_release`.
#[no_mangle]
pub extern "C" fn refbuf_create(
    size: usize,
    handle: *mut RefbufBufferHandle,
) -> RefbufErrorCode {
    if handle.is_null() {
        return RefbufErrorCode::InvalidParameter;
    }

    match RawBuffer::create(size) {
        Ok(raw) => {
            unsafe {
                RawBuffer::acquire(raw);
                *handle = raw.as_ptr();
            }
            RefbufErrorCode::Success
        }
        Err(e) => e.into(),
    }
}

/// Take one additional reference on a buffer.
///
/// Each successful acquire must be balanced by a `refbuf_release`.
#[no_mangle]
pub extern "C" fn refbuf_acquire(handle: RefbufBufferHandle) -> RefbufErrorCode {
    let Some(raw) = NonNull::new(handle) else {
        return RefbufErrorCode::InvalidParameter;
    };

    unsafe { RawBuffer::acquire(raw) };
    RefbufErrorCode::Success
}

/// Drop one reference on a buffer.
///
/// The release that drops the last reference frees the buffer; the
/// handle must not be used afterwards.
#[no_mangle]
pub extern "C" fn refbuf_release(handle: RefbufBufferHandle) -> RefbufErrorCode {
    let Some(raw) = NonNull::new(handle) else {
        return RefbufErrorCode::InvalidParameter;
    };

    unsafe { RawBuffer::release(raw) };
    RefbufErrorCode::Success
}

/// Pointer to the buffer's payload bytes, or null for a null handle.
///
/// The pointer is valid for `refbuf_size(handle)` bytes while the caller
/// holds a reference. Access is unsynchronized.
#[no_mangle]
pub extern "C" fn refbuf_data(handle: RefbufBufferHandle) -> *mut u8 {
    let Some(raw) = NonNull::new(handle) else {
        return std::ptr::null_mut();
    };

    unsafe { RawBuffer::payload_ptr(raw) }
}

/// Payload length in bytes, or 0 for a null handle
#[no_mangle]
pub extern "C" fn refbuf_size(handle: RefbufBufferHandle) -> usize {
    let Some(raw) = NonNull::new(handle) else {
        return 0;
    };

    unsafe { raw.as_ref() }.size()
}

/// Current reference count, or -1 for a null handle
#[no_mangle]
pub extern "C" fn refbuf_ref_count(handle: RefbufBufferHandle) -> i64 {
    let Some(raw) = NonNull::new(handle) else {
        return -1;
    };

    unsafe { raw.as_ref() }.ref_count()
}

/// Copy the process-wide buffer accounting counters into `stats`
#[no_mangle]
pub extern "C" fn refbuf_stats(stats: *mut RefbufStats) -> RefbufErrorCode {
    if stats.is_null() {
        return RefbufErrorCode::InvalidParameter;
    }

    let snapshot = global_stats();
    unsafe {
        *stats = RefbufStats {
            buffers_created: snapshot.buffers_created,
            buffers_destroyed: snapshot.buffers_destroyed,
            live_payload_bytes: snapshot.live_payload_bytes,
        };
    }
    RefbufErrorCode::Success
}
