//! Atomic primitives, swappable for loom model checking
//!
//! The loom types are only substituted in the unit-test build, where the
//! loom tests live; every other build of the crate (doctests,
//! integration tests, downstream users) always gets the std atomics.

#[cfg(not(all(test, feature = "loom")))]
pub(crate) use std::sync::atomic::{fence, AtomicI64, Ordering};

#[cfg(all(test, feature = "loom"))]
pub(crate) use loom::sync::atomic::{fence, AtomicI64, Ordering};
