//! Delay helpers shared by token renewal and job polling.

use crate::error::{Result, SunoError};
use rand::Rng;
use std::time::{Duration, Instant};

/// Uniform random delay in `[min_ms, max_ms]`.
pub(crate) fn jitter(min_ms: u64, max_ms: u64) -> Duration {
    if max_ms <= min_ms {
        return Duration::from_millis(min_ms);
    }
    Duration::from_millis(rand::rng().random_range(min_ms..=max_ms))
}

pub(crate) fn sleep(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    tracing::debug!(?delay, "sleeping");
    std::thread::sleep(delay);
}

/// Wall-clock bound on a polling loop.
pub(crate) struct Deadline {
    start: Instant,
    timeout: Duration,
}

impl Deadline {
    pub fn new(timeout: Duration) -> Self {
        Self {
            start: Instant::now(),
            timeout,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn expired(&self) -> bool {
        self.elapsed() >= self.timeout
    }

    pub fn remaining(&self) -> Duration {
        self.timeout.saturating_sub(self.elapsed())
    }

    /// Shorten `delay` so a sleep never runs past the deadline.
    pub fn clamp(&self, delay: Duration) -> Duration {
        delay.min(self.remaining())
    }

    /// Instant after which no request of the loop may still be running:
    /// the deadline plus `grace`. `None` when that lies beyond what
    /// [`Instant`] can represent.
    pub fn cutoff(&self, grace: Duration) -> Option<Instant> {
        self.start.checked_add(self.timeout.saturating_add(grace))
    }
}

/// Settle a request that failed mid-poll. A timeout past the deadline
/// yields the last observed state when there is one; anything else is
/// returned as the error it is.
pub(crate) fn settle<T>(err: SunoError, last: Option<T>, deadline: &Deadline) -> Result<T> {
    match last {
        Some(state) if err.is_timeout() && deadline.expired() => {
            tracing::warn!(elapsed = ?deadline.elapsed(), "request cut off, returning last state");
            Ok(state)
        }
        _ => Err(err),
    }
}
