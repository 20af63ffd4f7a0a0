//! Host-side rate measurement
//!
//! Both counters take explicit timestamps (seconds) so hosts can feed them
//! from whatever clock they have.

use std::collections::VecDeque;

/// Frames kept for the FPS estimate
const FPS_WINDOW: usize = 60;

/// FPS counter over the last 60 frames
pub struct FpsCounter {
    frames: VecDeque<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::with_capacity(FPS_WINDOW + 1),
        }
    }

    pub fn tick(&mut self, now: f64) {
        self.frames.push_back(now);
        if self.frames.len() > FPS_WINDOW {
            self.frames.pop_front();
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.front(), self.frames.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / elapsed
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Sliding-window event counter, reported per minute
pub struct RateCounter {
    /// Window length in seconds
    window: f64,
    arrivals: VecDeque<f64>,
    total: u64,
}

impl RateCounter {
    pub fn new(window: f64) -> Self {
        Self {
            window: window.max(f64::EPSILON),
            arrivals: VecDeque::new(),
            total: 0,
        }
    }

    pub fn record(&mut self, now: f64) {
        self.arrivals.push_back(now);
        self.total += 1;
        self.prune(now);
    }

    /// Drop arrivals older than the window
    pub fn prune(&mut self, now: f64) {
        let cutoff = now - self.window;
        while let Some(&front) = self.arrivals.front() {
            if front < cutoff {
                self.arrivals.pop_front();
            } else {
                break;
            }
        }
    }

    /// Events per minute over the window
    pub fn per_minute(&mut self, now: f64) -> f64 {
        self.prune(now);
        self.arrivals.len() as f64 * 60.0 / self.window
    }

    /// Events ever recorded
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Default for RateCounter {
    fn default() -> Self {
        Self::new(60.0)
    }
}
