//! Per-method sequence counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing counter that hands out record sequence numbers.
///
/// Each value is handed out exactly once. The read-increment-store step is a
/// single atomic operation, so concurrent callers never observe the same
/// value.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    next: AtomicU64,
}

impl SequenceCounter {
    /// Create a counter starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the current value and advance the counter.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// The value the next call to [`SequenceCounter::next`] will return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}
