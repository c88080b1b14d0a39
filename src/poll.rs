//! Bounded retry for page conditions

use std::time::Duration;

/// Fixed-interval bounded polling
///
/// Calls a probe up to `attempts` times with `interval` between calls. There is
/// no backoff and no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poll {
    pub attempts: u32,
    pub interval: Duration,
}

impl Poll {
    pub fn new(attempts: u32, interval: Duration) -> Self {
        Self { attempts: attempts.max(1), interval }
    }

    /// Enough attempts at `interval` to cover `timeout`, and at least one
    pub fn for_timeout(timeout: Duration, interval: Duration) -> Self {
        let attempts = if interval.is_zero() {
            1
        } else {
            timeout.as_millis().div_ceil(interval.as_millis().max(1))
        };
        Self::new(u32::try_from(attempts).unwrap_or(u32::MAX), interval)
    }

    /// Return the first `Some` produced by `probe`
    pub fn run<T>(&self, mut probe: impl FnMut() -> Option<T>) -> Option<T> {
        for attempt in 0..self.attempts {
            if attempt > 0 && !self.interval.is_zero() {
                std::thread::sleep(self.interval);
            }
            if let Some(value) = probe() {
                return Some(value);
            }
        }
        None
    }

    /// Like [`Poll::run`], stopping at the first error
    pub fn try_run<T, E>(&self, mut probe: impl FnMut() -> Result<Option<T>, E>) -> Result<Option<T>, E> {
        for attempt in 0..self.attempts {
            if attempt > 0 && !self.interval.is_zero() {
                std::thread::sleep(self.interval);
            }
            if let Some(value) = probe()? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}
