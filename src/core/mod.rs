//! Platform-agnostic core - shared between the CLI and the web host

pub mod color;
pub mod config;
pub mod engine;
pub mod events;
pub mod particle;
pub mod render;
pub mod spawner;
pub mod stepper;
pub mod toggles;

pub use color::{Color, ColorError};
pub use config::{ConfigError, EngineConfig, OverlayConfig};
pub use engine::Engine;
pub use events::{Arrival, EventKind, Tick};
pub use particle::{Particle, ParticleStore};
pub use render::{OverlayStats, Renderer};
pub use spawner::Spawner;
pub use stepper::Stepper;
pub use toggles::{OverlayCommand, OverlayFlags};
