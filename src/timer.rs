//! Elapsed-time measurement for benchmarking kernels.

use std::time::{Duration, Instant};

/// Monotonic stopwatch.
///
/// Backed by [`Instant`], so system clock adjustments never make it run
/// backwards. A new timer is already started.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Restarts the measurement from now.
    pub fn start(&mut self) {
        self.start = Instant::now();
    }

    /// Time since the last [`start`](Self::start).
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed microseconds.
    pub fn elapsed_us(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1_000_000.0
    }

    /// Elapsed milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_us() / 1000.0
    }

    /// Elapsed seconds.
    pub fn elapsed_sec(&self) -> f64 {
        self.elapsed_us() / 1_000_000.0
    }
}
