//! Intrusive buffer header and single-allocation layout
//!
//! A buffer is one contiguous heap block: a fixed 16-byte header holding
//! the atomic reference count and the payload length, followed immediately
//! by the payload bytes. There is no separate control block and no second
//! allocation.
//!
//! ```text
//! ┌──────────────────┬──────────────────┬─────────────────────────┐
//! │ ref_count: i64   │ size: usize      │ payload: `size` bytes   │
//! └──────────────────┴──────────────────┴─────────────────────────┘
//! ```
//!
//! A raw buffer is born with `ref_count == 0` and must be adopted by a
//! first [`acquire`](RawBuffer::acquire) before it is shared. The release
//! that observes a count of zero frees the whole block. Most callers want
//! [`DataBuffer`](crate::DataBuffer), which wires acquire/release to
//! `Clone`/`Drop`; the raw surface exists for FFI and for collaborators
//! that hold raw pointers.

use std::{
    alloc::{alloc_zeroed, dealloc, Layout},
    mem,
    ptr::{self, NonNull},
};

use crate::{
    error::{RefbufError, Result},
    sync::{fence, AtomicI64, Ordering},
};

use super::stats;

/// Size in bytes of the buffer header on 64-bit targets
pub const HEADER_SIZE: usize = 16;

/// Intrusive header of a shared byte buffer
///
/// The payload region lives in the same allocation, immediately after
/// this struct. Collaborators never touch the fields directly; the whole
/// surface is the associated functions below.
#[repr(C)]
pub struct RawBuffer {
    /// Number of live owning handles; zero at creation, zero again at destruction
    ref_count: AtomicI64,
    /// Payload length in bytes, fixed at creation
    size: usize,
}

#[cfg(all(not(feature = "loom"), target_pointer_width = "64"))]
const _: () = assert!(mem::size_of::<RawBuffer>() == HEADER_SIZE);

impl RawBuffer {
    /// Allocate a buffer with `size` payload bytes.
    ///
    /// The returned buffer is uncounted (`ref_count == 0`): the first
    /// handle wrapping it must perform the adopting acquire before any
    /// sharing occurs. The payload is zero-filled.
    pub fn create(size: usize) -> Result<NonNull<RawBuffer>> {
        let layout = Self::checked_block_layout(size)?;

        let block = unsafe { alloc_zeroed(layout) };
        let Some(raw) = NonNull::new(block as *mut RawBuffer) else {
            return Err(RefbufError::allocation_failed(size));
        };

        // The zeroed block is not a valid header under loom (its atomics
        // carry model state), so construct the fields in place.
        unsafe {
            ptr::addr_of_mut!((*raw.as_ptr()).ref_count).write(AtomicI64::new(0));
            ptr::addr_of_mut!((*raw.as_ptr()).size).write(size);
        }

        stats::record_created(size);
        Ok(raw)
    }

    /// Atomically take one unit of ownership.
    ///
    /// The post-increment count must be strictly positive; observing
    /// anything else means the buffer was already destroyed and aborts.
    ///
    /// # Safety
    ///
    /// `buf` must point to a buffer created by [`RawBuffer::create`] that
    /// has not been destroyed, and the caller must either hold a counted
    /// reference to it or be performing the adopting acquire on a buffer
    /// it has not shared yet.
    pub unsafe fn acquire(buf: NonNull<RawBuffer>) {
        let prev = buf.as_ref().ref_count.fetch_add(1, Ordering::Relaxed);
        assert!(
            prev >= 0,
            "buffer acquired after destruction (count was {prev})"
        );
    }

    /// Atomically drop one unit of ownership.
    ///
    /// The release that observes a post-decrement count of zero frees the
    /// whole header+payload block before returning. Observing a negative
    /// count (over-release, release without acquire) aborts.
    ///
    /// # Safety
    ///
    /// `buf` must point to a live buffer and the caller must hold one
    /// counted reference, which this call consumes. The pointer must not
    /// be used afterwards.
    pub unsafe fn release(buf: NonNull<RawBuffer>) {
        let prev = buf.as_ref().ref_count.fetch_sub(1, Ordering::Release);
        assert!(
            prev >= 1,
            "buffer over-released (count went to {})",
            prev - 1
        );
        if prev == 1 {
            // Pair with the Release decrements of the other handles so
            // their payload writes are visible before the block is freed.
            fence(Ordering::Acquire);
            Self::destroy(buf);
        }
    }

    /// Pointer to the first payload byte, immediately after the header.
    ///
    /// # Safety
    ///
    /// `buf` must point to a live buffer. The returned pointer is valid
    /// for `size` bytes while the buffer stays live; access is
    /// unsynchronized and callers coordinate writers externally.
    pub unsafe fn payload_ptr(buf: NonNull<RawBuffer>) -> *mut u8 {
        (buf.as_ptr() as *mut u8).add(mem::size_of::<RawBuffer>())
    }

    /// Payload length in bytes, fixed at creation
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current reference count (diagnostic; racy by nature)
    pub fn ref_count(&self) -> i64 {
        self.ref_count.load(Ordering::Relaxed)
    }

    /// Free the single header+payload allocation.
    ///
    /// Only ever called by the release that observed zero; the count is
    /// asserted to be exactly zero at that moment.
    unsafe fn destroy(buf: NonNull<RawBuffer>) {
        let observed = buf.as_ref().ref_count.load(Ordering::Relaxed);
        assert!(
            observed == 0,
            "buffer destroyed with live references (count {observed})"
        );

        let size = buf.as_ref().size;
        let layout = Self::block_layout(size);
        ptr::drop_in_place(buf.as_ptr());
        dealloc(buf.as_ptr() as *mut u8, layout);

        stats::record_destroyed(size);
    }

    /// Layout of the whole block, validated against address-space limits
    fn checked_block_layout(size: usize) -> Result<Layout> {
        let header = Layout::new::<RawBuffer>();
        let payload =
            Layout::array::<u8>(size).map_err(|_| RefbufError::allocation_failed(size))?;
        match header.extend(payload) {
            Ok((layout, _offset)) => Ok(layout),
            Err(_) => Err(RefbufError::allocation_failed(size)),
        }
    }

    /// Layout of the whole block for a size that already passed creation.
    ///
    /// # Safety
    ///
    /// `size` must be the recorded size of a successfully created buffer.
    unsafe fn block_layout(size: usize) -> Layout {
        Layout::from_size_align_unchecked(
            mem::size_of::<RawBuffer>() + size,
            mem::align_of::<RawBuffer>(),
        )
    }
}

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_header_is_16_bytes() {
        assert_eq!(mem::size_of::<RawBuffer>(), HEADER_SIZE);
    }

    #[test]
    fn test_raw_buffer_starts_uncounted() {
        let raw = RawBuffer::create(64).unwrap();
        unsafe {
            assert_eq!(raw.as_ref().ref_count(), 0);
            assert_eq!(raw.as_ref().size(), 64);

            RawBuffer::acquire(raw);
            assert_eq!(raw.as_ref().ref_count(), 1);

            RawBuffer::release(raw);
        }
    }

    #[test]
    fn test_payload_is_zero_filled() {
        let raw = RawBuffer::create(128).unwrap();
        unsafe {
            RawBuffer::acquire(raw);

            let payload = RawBuffer::payload_ptr(raw);
            for i in 0..128 {
                assert_eq!(*payload.add(i), 0);
            }

            RawBuffer::release(raw);
        }
    }

    #[test]
    fn test_zero_size_buffer() {
        let raw = RawBuffer::create(0).unwrap();
        unsafe {
            assert_eq!(raw.as_ref().size(), 0);
            RawBuffer::acquire(raw);
            RawBuffer::release(raw);
        }
    }

    #[test]
    fn test_payload_follows_header() {
        let raw = RawBuffer::create(8).unwrap();
        unsafe {
            let header_addr = raw.as_ptr() as usize;
            let payload_addr = RawBuffer::payload_ptr(raw) as usize;
            assert_eq!(payload_addr - header_addr, mem::size_of::<RawBuffer>());

            RawBuffer::acquire(raw);
            RawBuffer::release(raw);
        }
    }

    #[test]
    fn test_oversized_request_fails() {
        // Cannot be represented as a Layout; must surface as a
        // recoverable allocation failure, not a panic.
        let err = RawBuffer::create(usize::MAX - 8).unwrap_err();
        assert!(matches!(
            err,
            RefbufError::AllocationFailed { requested } if requested == usize::MAX - 8
        ));
    }

    #[test]
    #[should_panic(expected = "over-released")]
    fn test_release_without_acquire_aborts() {
        let raw = RawBuffer::create(16).unwrap();
        // Count is 0; decrementing observes -1. The buffer leaks, which
        // is fine for an abort path exercised in a test.
        unsafe { RawBuffer::release(raw) };
    }
}
