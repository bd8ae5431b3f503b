//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

/// Opaque handle for a scheduled one-shot restart.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// Monotonic allocator for TimerHandle.
/// Handles are never reused within one scheduler, so a stale handle can
/// always be told apart from the one currently pending.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_timer: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_timer(&mut self) -> TimerHandle {
        let id = TimerHandle(self.next_timer);
        self.next_timer = self.next_timer.wrapping_add(1);
        id
    }
}
