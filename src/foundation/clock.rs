use std::cell::Cell;
use std::time::Instant;

/// Wall-clock source consulted by the player on start and on every tick.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin. Must be non-decreasing.
    fn now_ms(&self) -> f64;
}

impl<K: Clock + ?Sized> Clock for &K {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// Monotonic clock backed by [`Instant`], with its origin at construction time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock whose origin is "now".
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-stepped clock for tests and offline frame generation.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Create a clock reading `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Move the clock forward by `delta_ms` (negative deltas are ignored).
    pub fn advance(&self, delta_ms: f64) {
        if delta_ms > 0.0 {
            self.now.set(self.now.get() + delta_ms);
        }
    }

    /// Jump to an absolute reading; ignored if it would move time backwards.
    pub fn set(&self, now_ms: f64) {
        if now_ms >= self.now.get() {
            self.now.set(now_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/clock.rs"]
mod tests;
