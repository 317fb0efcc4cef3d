//! Rate limiting for cursor previews.
//!
//! Pointer-move events arrive far faster than the readouts need to refresh.
//! [`Throttle`] accepts at most one event per interval, measured against a
//! monotonic clock supplied by the caller in milliseconds (the browser's
//! `performance.now()`), so tests can drive it with explicit timestamps.

#[cfg(test)]
#[path = "throttle_test.rs"]
mod throttle_test;

#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    interval_ms: f64,
    last_accepted_ms: Option<f64>,
}

impl Throttle {
    /// Allow `rate_hz` events per second. Non-positive rates disable throttling.
    #[must_use]
    pub fn from_rate_hz(rate_hz: f64) -> Self {
        let interval_ms = if rate_hz > 0.0 { 1000.0 / rate_hz } else { 0.0 };
        Self { interval_ms, last_accepted_ms: None }
    }

    /// A throttle that accepts every event.
    #[must_use]
    pub fn unlimited() -> Self {
        Self { interval_ms: 0.0, last_accepted_ms: None }
    }

    #[must_use]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Accept the event at `now_ms` if the interval has elapsed since the last
    /// accepted one, recording it as the new reference point.
    pub fn accept_at(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            if now_ms - last < self.interval_ms {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }

    /// Forget the last accepted event so the next one passes immediately.
    pub fn reset(&mut self) {
        self.last_accepted_ms = None;
    }
}
