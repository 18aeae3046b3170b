//! Integration tests for the buffer handle surface
//! Covers sizing, the zero-start/adoption convention, sharing semantics,
//! and the fatal over-release path.

use refbuf::{DataBuffer, RawBuffer, RefbufError, HEADER_SIZE};

#[test]
fn size_matches_creation_request() {
    for n in [0usize, 1, 16, 4096, 1024 * 1024] {
        let buffer = DataBuffer::new(n).unwrap();
        assert_eq!(buffer.size(), n);
        assert_eq!(buffer.as_slice().len(), n);
    }
}

#[test]
fn header_size_contract() {
    #[cfg(target_pointer_width = "64")]
    assert_eq!(HEADER_SIZE, 16);
}

#[test]
fn raw_buffer_is_born_uncounted() {
    let raw = RawBuffer::create(32).unwrap();
    unsafe {
        assert_eq!(raw.as_ref().ref_count(), 0);

        // The adopting acquire brings the count to one.
        let handle = DataBuffer::adopt_raw(raw);
        assert_eq!(handle.ref_count(), 1);
    }
}

#[test]
fn factory_folds_in_the_first_acquire() {
    let buffer = DataBuffer::new(16).unwrap();
    assert_eq!(buffer.ref_count(), 1);
}

#[test]
fn clone_and_drop_track_the_count() {
    let buffer = DataBuffer::new(8).unwrap();

    let a = buffer.clone();
    let b = a.clone();
    assert_eq!(buffer.ref_count(), 3);

    drop(a);
    assert_eq!(buffer.ref_count(), 2);
    drop(b);
    assert_eq!(buffer.ref_count(), 1);
}

#[test]
fn writes_remain_visible_to_other_handles() {
    let mut writer = DataBuffer::new(64).unwrap();
    writer.as_mut_slice()[..3].copy_from_slice(&[7, 8, 9]);

    let reader = writer.clone();
    let extra = writer.clone();

    // A release that does not drop the count to zero must leave the
    // payload untouched for the remaining holders.
    drop(extra);
    assert_eq!(&reader.as_slice()[..3], &[7, 8, 9]);

    drop(writer);
    assert_eq!(&reader.as_slice()[..3], &[7, 8, 9]);
    assert_eq!(reader.ref_count(), 1);
}

#[test]
fn fresh_payload_reads_as_zeros() {
    let buffer = DataBuffer::new(256).unwrap();
    assert!(buffer.as_slice().iter().all(|&b| b == 0));
}

#[test]
fn from_slice_copies_the_payload() {
    let source = vec![0xA5u8; 100];
    let buffer = DataBuffer::from_slice(&source).unwrap();
    assert_eq!(buffer.size(), 100);
    assert_eq!(buffer.as_slice(), &source[..]);
}

#[test]
fn deep_clone_has_independent_lifecycle() {
    let original = DataBuffer::from_slice(b"shared").unwrap();
    let copy = original.deep_clone().unwrap();

    drop(original);
    // The copy survives the original's destruction untouched.
    assert_eq!(copy.as_slice(), b"shared");
    assert_eq!(copy.ref_count(), 1);
}

#[test]
fn oversized_creation_is_a_recoverable_error() {
    let result = DataBuffer::new(usize::MAX - 8);
    assert!(matches!(
        result,
        Err(RefbufError::AllocationFailed { .. })
    ));
}

#[test]
#[should_panic(expected = "over-released")]
fn releasing_an_uncounted_buffer_aborts() {
    // Count starts at zero; this decrement observes -1, which is a
    // release-without-acquire bug and must die loudly.
    let raw = RawBuffer::create(16).unwrap();
    unsafe { RawBuffer::release(raw) };
}
