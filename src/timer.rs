//! Scheduled continuations for transition phases.
//!
//! The transition controller never sleeps. Each timed phase is described
//! by a [`ScheduledTask`] with an absolute due time; the host arms a timer
//! for it and calls back into the viewer when it fires.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cancellation token shared between a scheduled task and its timer.
///
/// All clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel this token and every clone of it. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check if `cancel()` has been called on this token or any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// A timed continuation waiting for its due time.
#[derive(Clone, Debug)]
pub struct ScheduledTask {
    id: u64,
    due_ms: u64,
    token: CancellationToken,
}

impl ScheduledTask {
    /// Schedule a task `delay_ms` after `now_ms`.
    pub fn new(id: u64, now_ms: u64, delay_ms: u32) -> Self {
        Self {
            id,
            due_ms: now_ms.saturating_add(u64::from(delay_ms)),
            token: CancellationToken::new(),
        }
    }

    /// Identifier, unique per controller.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Absolute time (ms) at which the task becomes due.
    #[inline]
    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }

    /// Milliseconds left until the task is due (0 if already due).
    #[inline]
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.due_ms.saturating_sub(now_ms)
    }

    /// Check if the task should run at `now_ms`.
    pub fn is_due(&self, now_ms: u64) -> bool {
        !self.token.is_cancelled() && now_ms >= self.due_ms
    }

    /// Token a host timer can hold to observe cancellation.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancel the task. A cancelled task never becomes due.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
