//! Engine configuration
//!
//! Everything the animation needs to know up front: palette, ball radius,
//! speed bounds, prune cadence and overlay styling. Loaded once at startup
//! (JSON, every field optional) and immutable afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::color::Color;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Placement and style of the statistics overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub color: Color,
    /// CSS font string handed to the draw context
    pub font: String,
    /// X of the particle count label
    pub count_x: f64,
    /// X of the fps label
    pub fps_x: f64,
    /// X of the events-per-minute label
    pub rpm_x: f64,
    /// Distance of the text baseline from the bottom edge
    pub bottom_margin: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            font: "12px Arial".to_string(),
            count_x: 15.0,
            fps_x: 90.0,
            rpm_x: 140.0,
            bottom_margin: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Colors a ball may be assigned, sampled uniformly
    pub palette: Vec<Color>,
    /// Ball radius in pixels
    pub radius: f64,
    /// Slowest ball, pixels per second
    pub min_speed: f64,
    /// Fastest ball, pixels per second
    pub max_speed: f64,
    /// Off-screen balls are swept every this many ticks
    pub prune_interval: u64,
    pub background: Color,
    /// Message color requested from the host at startup
    pub message_color: Color,
    pub overlay: OverlayConfig,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Hard cap on live balls; arrivals beyond it are dropped (unbounded when absent)
    pub max_particles: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            palette: Color::default_palette(),
            radius: 3.0,
            min_speed: 300.0,
            max_speed: 500.0,
            prune_interval: 20,
            background: Color::BLACK,
            message_color: Color::WHITE,
            overlay: OverlayConfig::default(),
            seed: None,
            max_particles: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), palette = config.palette.len(), "Loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty".into()));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.min_speed.is_finite() && self.max_speed.is_finite()) || self.min_speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "speeds must be positive, got {}..{}",
                self.min_speed, self.max_speed
            )));
        }
        if self.min_speed > self.max_speed {
            return Err(ConfigError::Invalid(format!(
                "min_speed {} exceeds max_speed {}",
                self.min_speed, self.max_speed
            )));
        }
        if self.prune_interval == 0 {
            return Err(ConfigError::Invalid("prune_interval must be at least 1".into()));
        }
        Ok(())
    }
}
