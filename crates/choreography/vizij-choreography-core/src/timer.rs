//! Clocks and the single-slot restart scheduler.
//!
//! Timers are cooperative: nothing fires on its own. The owner polls
//! [`RestartScheduler::take_due`] (the choreographer does this at the start of
//! every `advance`), so a due restart is delivered on the next frame or poll.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::ids::{IdAllocator, TimerHandle};

/// Monotonic time source for restart deadlines.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by `instant::Instant` (works on wasm32 as well).
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: instant::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// clone and move another into a choreographer.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    handle: TimerHandle,
    due: Duration,
}

/// Holds at most one pending one-shot timer.
#[derive(Debug)]
pub struct RestartScheduler<C: Clock> {
    clock: C,
    ids: IdAllocator,
    pending: Option<PendingTimer>,
}

impl<C: Clock> RestartScheduler<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            ids: IdAllocator::new(),
            pending: None,
        }
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Schedule a timer `delay` from now. Returns the new handle and the
    /// handle it displaced, if one was still pending.
    pub fn schedule(&mut self, delay: Duration) -> (TimerHandle, Option<TimerHandle>) {
        let replaced = self.cancel();
        let handle = self.ids.alloc_timer();
        self.pending = Some(PendingTimer {
            handle,
            due: self.clock.now() + delay,
        });
        (handle, replaced)
    }

    /// Cancel whatever is pending. The cancelled timer never becomes due.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.pending.take().map(|p| p.handle)
    }

    /// Consume the pending timer only if it is `handle`.
    pub fn claim(&mut self, handle: TimerHandle) -> bool {
        match self.pending {
            Some(p) if p.handle == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending.map(|p| p.handle)
    }

    /// Time left until the pending timer is due.
    pub fn remaining(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.pending.map(|p| p.due.saturating_sub(now))
    }

    /// Remove and return the pending timer if its deadline has passed.
    pub fn take_due(&mut self) -> Option<TimerHandle> {
        let now = self.clock.now();
        match self.pending {
            Some(p) if now >= p.due => {
                self.pending = None;
                Some(p.handle)
            }
            _ => None,
        }
    }
}
