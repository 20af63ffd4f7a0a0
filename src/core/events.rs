//! Events delivered to the engine by its host

use serde::{Deserialize, Serialize};

/// One unit of incoming work (e.g. a parsed log line)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrival {
    /// Raw payload. Carried for hosts and logs, not used for visuals.
    pub payload: String,
}

impl Arrival {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

/// One rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Seconds since the previous tick
    pub elapsed_time: f64,
    /// Monotonically increasing frame counter
    pub sequence_count: u64,
}

impl Tick {
    pub fn new(elapsed_time: f64, sequence_count: u64) -> Self {
        Self {
            elapsed_time,
            sequence_count,
        }
    }

    /// Elapsed time usable for integration: negative or non-finite deltas count as zero
    pub fn delta(&self) -> f64 {
        if self.elapsed_time.is_finite() && self.elapsed_time > 0.0 {
            self.elapsed_time
        } else {
            0.0
        }
    }
}

/// Event kinds a visualization can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Arrival,
    Tick,
}
