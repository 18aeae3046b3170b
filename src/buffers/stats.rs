//! Process-global buffer allocation accounting
//!
//! Every buffer creation and destruction is counted here, which is what
//! lets tests observe that a lifecycle deallocated exactly once with no
//! leak. The counters are plain relaxed atomics on the std types even in
//! loom builds: they are diagnostics, not part of the modeled algorithm.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

static BUFFERS_CREATED: AtomicU64 = AtomicU64::new(0);
static BUFFERS_DESTROYED: AtomicU64 = AtomicU64::new(0);
static LIVE_PAYLOAD_BYTES: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn record_created(size: usize) {
    BUFFERS_CREATED.fetch_add(1, Ordering::Relaxed);
    LIVE_PAYLOAD_BYTES.fetch_add(size, Ordering::Relaxed);
}

pub(crate) fn record_destroyed(size: usize) {
    BUFFERS_DESTROYED.fetch_add(1, Ordering::Relaxed);
    LIVE_PAYLOAD_BYTES.fetch_sub(size, Ordering::Relaxed);
}

/// Snapshot of process-wide buffer accounting
///
/// The fields are read individually without a lock, so a snapshot taken
/// while other threads allocate is approximate; the derived helpers
/// saturate instead of underflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferStats {
    /// Total number of buffers ever created
    pub buffers_created: u64,
    /// Total number of buffers destroyed (single-block deallocations)
    pub buffers_destroyed: u64,
    /// Payload bytes currently held by live buffers
    pub live_payload_bytes: usize,
}

impl BufferStats {
    /// Number of buffers currently live
    pub fn live_buffers(&self) -> u64 {
        self.buffers_created.saturating_sub(self.buffers_destroyed)
    }
}

/// Take a snapshot of the global buffer counters
pub fn global_stats() -> BufferStats {
    BufferStats {
        buffers_created: BUFFERS_CREATED.load(Ordering::Relaxed),
        buffers_destroyed: BUFFERS_DESTROYED.load(Ordering::Relaxed),
        live_payload_bytes: LIVE_PAYLOAD_BYTES.load(Ordering::Relaxed),
    }
}
