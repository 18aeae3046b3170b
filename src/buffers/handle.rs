//! Owning handle for reference-counted byte buffers

use std::{fmt, ptr::NonNull, slice};

use crate::error::Result;

use super::raw::RawBuffer;

/// An owning handle to a shared byte buffer
///
/// Every `DataBuffer` represents one unit of ownership over a single
/// heap block holding the buffer header and its payload. Cloning a
/// handle increments the shared count; dropping one decrements it, and
/// the last drop frees the block. All handles are interchangeable;
/// deallocation is not tied to which handle is dropped last.
///
/// Payload access is unsynchronized: handles sharing a
/// buffer across threads while mutating its contents must coordinate
/// externally (for example single-writer-then-freeze).
pub struct DataBuffer {
    /// Pointer to the intrusive header; the payload follows it in the same allocation
    raw: NonNull<RawBuffer>,
}

impl DataBuffer {
    /// Create a new zero-filled buffer with `size` payload bytes.
    ///
    /// The returned handle already holds one reference: the adopting
    /// acquire of the freshly created (uncounted) raw buffer is folded
    /// into the factory so callers never see a zero-count buffer.
    pub fn new(size: usize) -> Result<Self> {
        let raw = RawBuffer::create(size)?;
        // Adopt the uncounted buffer before anything can share it.
        unsafe { RawBuffer::acquire(raw) };
        Ok(Self { raw })
    }

    /// Create a buffer holding a copy of `bytes`
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut buffer = Self::new(bytes.len())?;
        buffer.as_mut_slice().copy_from_slice(bytes);
        Ok(buffer)
    }

    /// Wrap a raw buffer in a handle, performing the adopting acquire.
    ///
    /// # Safety
    ///
    /// `raw` must point to a live buffer created by
    /// [`RawBuffer::create`], and the caller must be entitled to take a
    /// reference to it: either it holds a counted reference already, or
    /// the buffer is freshly created and unshared.
    pub unsafe fn adopt_raw(raw: NonNull<RawBuffer>) -> Self {
        RawBuffer::acquire(raw);
        Self { raw }
    }

    /// Consume the handle without releasing, returning the raw buffer.
    ///
    /// The reference this handle held is transferred to the caller, who
    /// becomes responsible for balancing it with a
    /// [`RawBuffer::release`] (or re-wrapping via [`Self::adopt_raw`]
    /// plus a release for the extra acquire).
    pub fn into_raw(self) -> NonNull<RawBuffer> {
        let raw = self.raw;
        std::mem::forget(self);
        raw
    }

    /// Get the payload as a byte slice
    pub fn as_slice(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(RawBuffer::payload_ptr(self.raw), self.size()) }
    }

    /// Get the payload as a mutable byte slice
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(RawBuffer::payload_ptr(self.raw), self.size()) }
    }

    /// Get a raw pointer to the payload
    pub fn as_ptr(&self) -> *const u8 {
        unsafe { RawBuffer::payload_ptr(self.raw) }
    }

    /// Get a mutable raw pointer to the payload
    pub fn as_mut_ptr(&self) -> *mut u8 {
        unsafe { RawBuffer::payload_ptr(self.raw) }
    }

    /// Payload length in bytes, fixed at creation
    pub fn size(&self) -> usize {
        unsafe { self.raw.as_ref() }.size()
    }

    /// Whether the payload is zero-length
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Current number of live handles sharing this buffer (diagnostic;
    /// racy the instant other threads clone or drop)
    pub fn ref_count(&self) -> i64 {
        unsafe { self.raw.as_ref() }.ref_count()
    }

    /// Create an independent buffer with a copy of this payload.
    ///
    /// The clone has its own allocation and its own count; releasing
    /// either buffer never affects the other.
    pub fn deep_clone(&self) -> Result<Self> {
        Self::from_slice(self.as_slice())
    }
}

impl Clone for DataBuffer {
    /// Duplicate ownership of the same buffer (atomic increment)
    fn clone(&self) -> Self {
        unsafe { RawBuffer::acquire(self.raw) };
        Self { raw: self.raw }
    }
}

impl Drop for DataBuffer {
    /// Drop one unit of ownership; the last handle frees the block
    fn drop(&mut self) {
        unsafe { RawBuffer::release(self.raw) };
    }
}

impl fmt::Debug for DataBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataBuffer")
            .field("size", &self.size())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

unsafe impl Send for DataBuffer {}
unsafe impl Sync for DataBuffer {}
