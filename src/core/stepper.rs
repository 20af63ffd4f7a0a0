//! Per-tick motion and the periodic off-screen sweep

use tracing::debug;

use super::config::EngineConfig;
use super::events::Tick;
use super::particle::ParticleStore;

#[derive(Debug, Clone, Copy)]
pub struct Stepper {
    radius: f64,
    prune_interval: u64,
}

impl Stepper {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            radius: config.radius,
            prune_interval: config.prune_interval.max(1),
        }
    }

    /// Whether this tick sweeps off-screen balls
    #[inline]
    pub fn is_prune_tick(&self, tick: &Tick) -> bool {
        tick.sequence_count % self.prune_interval == 0
    }

    /// Advance every ball by `speed * elapsed_time`, then sweep on prune ticks.
    ///
    /// Returns the number of balls removed. Between sweeps the store may hold
    /// balls that already left the surface; they keep moving until the next
    /// prune tick.
    pub fn step(&self, store: &mut ParticleStore, tick: &Tick, surface_width: f64) -> usize {
        let dt = tick.delta();
        for particle in store.iter_mut() {
            particle.x += particle.speed * dt;
        }

        if !self.is_prune_tick(tick) {
            return 0;
        }

        let before = store.len();
        let limit = surface_width + self.radius;
        store.retain(|p| p.x < limit);
        let pruned = before - store.len();
        if pruned > 0 {
            debug!(
                pruned,
                remaining = store.len(),
                tick = tick.sequence_count,
                "Pruned off-screen balls"
            );
        }
        pruned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;
    use crate::core::particle::Particle;

    fn stepper() -> Stepper {
        Stepper::new(&EngineConfig::default())
    }

    fn store_with(speeds: &[f64]) -> ParticleStore {
        let mut store = ParticleStore::new();
        for &speed in speeds {
            store.push(Particle::new(Color::WHITE, speed, 100.0));
        }
        store
    }

    #[test]
    fn test_x_accumulates_speed_times_elapsed() {
        let stepper = stepper();
        let mut store = store_with(&[300.0, 450.0]);
        let deltas = [0.25, 0.5, 0.125, 0.0625];
        for (i, &dt) in deltas.iter().enumerate() {
            stepper.step(&mut store, &Tick::new(dt, i as u64 + 1), 1_000_000.0);
        }
        let total: f64 = deltas.iter().sum();
        let xs: Vec<f64> = store.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![300.0 * total, 450.0 * total]);
    }

    #[test]
    fn test_negative_elapsed_does_not_move_backwards() {
        let stepper = stepper();
        let mut store = store_with(&[300.0]);
        stepper.step(&mut store, &Tick::new(1.0, 1), 800.0);
        stepper.step(&mut store, &Tick::new(-0.5, 2), 800.0);
        assert_eq!(store.iter().next().unwrap().x, 300.0);
    }

    #[test]
    fn test_prune_only_on_interval_boundary() {
        let stepper = stepper();
        let mut store = store_with(&[1000.0]);

        // Off-screen after the first tick, but kept until tick 20
        assert_eq!(stepper.step(&mut store, &Tick::new(1.0, 1), 800.0), 0);
        for seq in 2..20 {
            assert_eq!(stepper.step(&mut store, &Tick::new(0.0, seq), 800.0), 0);
            assert_eq!(store.len(), 1, "tick {seq} must not prune");
        }
        assert_eq!(stepper.step(&mut store, &Tick::new(0.0, 20), 800.0), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_prune_boundary_is_width_plus_radius() {
        let stepper = stepper();
        let mut store = ParticleStore::new();
        for x in [802.9, 803.0, 803.1, 10.0] {
            store.push(Particle {
                x,
                ..Particle::new(Color::WHITE, 1.0, 50.0)
            });
        }
        let pruned = stepper.step(&mut store, &Tick::new(0.0, 40), 800.0);
        assert_eq!(pruned, 2);
        let xs: Vec<f64> = store.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![802.9, 10.0]);
    }

    #[test]
    fn test_custom_interval() {
        let stepper = Stepper::new(&EngineConfig {
            prune_interval: 3,
            ..EngineConfig::default()
        });
        assert!(!stepper.is_prune_tick(&Tick::new(0.0, 1)));
        assert!(stepper.is_prune_tick(&Tick::new(0.0, 3)));
        assert!(stepper.is_prune_tick(&Tick::new(0.0, 6)));
    }
}
