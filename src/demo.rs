//! Demo mode: a stream of random access-log lines
//!
//! Useful when building a visualization without a real server log. Gaps
//! between lines are exponentially distributed around the requested rate.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

const METHODS: &[&str] = &["GET", "GET", "GET", "POST", "PUT", "DELETE"];
const PATHS: &[&str] = &[
    "/",
    "/index.html",
    "/blog",
    "/api/items",
    "/login",
    "/static/app.js",
    "/favicon.ico",
];
const STATUSES: &[u16] = &[200, 200, 200, 200, 301, 304, 404, 500];

/// Longest gap the feed will ever wait
const MAX_GAP_SECS: f64 = 60.0;

pub struct DemoFeed {
    rng: StdRng,
    /// Mean lines per second
    rate: f64,
}

impl DemoFeed {
    pub fn new(rate_per_minute: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            rate: (rate_per_minute / 60.0).max(1.0 / MAX_GAP_SECS),
        }
    }

    /// Time to wait before the next line
    pub fn next_gap(&mut self) -> Duration {
        let u: f64 = self.rng.gen();
        let gap = -(1.0 - u).ln() / self.rate;
        Duration::from_secs_f64(gap.clamp(0.0, MAX_GAP_SECS))
    }

    pub fn next_line(&mut self) -> String {
        let method = METHODS[self.rng.gen_range(0..METHODS.len())];
        let path = PATHS[self.rng.gen_range(0..PATHS.len())];
        let status = STATUSES[self.rng.gen_range(0..STATUSES.len())];
        let bytes: u32 = self.rng.gen_range(128..65_536);
        format!(
            "198.51.100.{} - - \"{} {} HTTP/1.1\" {} {}",
            self.rng.gen_range(1..255),
            method,
            path,
            status,
            bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_look_like_access_log() {
        let mut feed = DemoFeed::new(600.0, Some(1));
        for _ in 0..50 {
            let line = feed.next_line();
            assert!(line.starts_with("198.51.100."), "{line}");
            assert!(line.contains(" HTTP/1.1\" "), "{line}");
        }
    }

    #[test]
    fn test_mean_gap_tracks_rate() {
        let mut feed = DemoFeed::new(600.0, Some(2));
        let n = 5000;
        let total: f64 = (0..n).map(|_| feed.next_gap().as_secs_f64()).sum();
        let mean = total / n as f64;
        // 600/min = 0.1 s mean
        assert!((mean - 0.1).abs() < 0.01, "mean gap {mean}");
    }

    #[test]
    fn test_zero_rate_is_bounded() {
        let mut feed = DemoFeed::new(0.0, Some(3));
        for _ in 0..100 {
            assert!(feed.next_gap() <= Duration::from_secs_f64(MAX_GAP_SECS));
        }
    }
}
