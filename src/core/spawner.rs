//! Turns arrivals into freshly randomized balls

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::color::Color;
use super::config::EngineConfig;
use super::particle::{Particle, ParticleStore};

pub struct Spawner {
    rng: StdRng,
    palette: Vec<Color>,
    radius: f64,
    min_speed: f64,
    max_speed: f64,
    max_particles: Option<usize>,
}

impl Spawner {
    pub fn new(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            palette: config.palette.clone(),
            radius: config.radius,
            min_speed: config.min_speed,
            max_speed: config.max_speed,
            max_particles: config.max_particles,
        }
    }

    /// Sample a new ball for a surface of the given height
    pub fn sample(&mut self, surface_height: f64) -> Particle {
        let color = if self.palette.is_empty() {
            Color::WHITE
        } else {
            self.palette[self.rng.gen_range(0..self.palette.len())]
        };
        let speed = if self.min_speed < self.max_speed {
            self.rng.gen_range(self.min_speed..=self.max_speed)
        } else {
            self.min_speed
        };

        // Surfaces shorter than two diameters leave no valid band: use the midline
        let low = self.radius * 2.0;
        let high = surface_height - self.radius * 2.0;
        let y = if low < high {
            self.rng.gen_range(low..=high)
        } else {
            surface_height / 2.0
        };

        Particle::new(color, speed, y)
    }

    /// Spawn one ball into the store. Returns false if the store is at its cap.
    pub fn spawn(&mut self, store: &mut ParticleStore, surface_height: f64) -> bool {
        if let Some(cap) = self.max_particles {
            if store.len() >= cap {
                trace!(cap, "Particle cap reached, arrival dropped");
                return false;
            }
        }
        let particle = self.sample(surface_height);
        trace!(y = particle.y, speed = particle.speed, color = %particle.color, "Spawned ball");
        store.push(particle);
        true
    }
}
