//! Balls and the insertion-ordered store that owns them

use super::color::Color;

/// A single ball travelling left to right at constant speed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub color: Color,
    /// Horizontal pixels per second, always positive
    pub speed: f64,
    pub y: f64,
    pub x: f64,
}

impl Particle {
    /// New ball at the left edge
    pub fn new(color: Color, speed: f64, y: f64) -> Self {
        Self {
            color,
            speed,
            y,
            x: 0.0,
        }
    }
}

/// Live balls in spawn order. Later entries are drawn on top.
#[derive(Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Keep only particles matching predicate, preserving order
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Particle) -> bool,
    {
        self.particles.retain(f);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(x: f64) -> Particle {
        Particle {
            x,
            ..Particle::new(Color::WHITE, 1.0, 10.0)
        }
    }

    #[test]
    fn test_new_particle_starts_at_left_edge() {
        let p = Particle::new(Color::BLACK, 350.0, 42.0);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 42.0);
        assert_eq!(p.speed, 350.0);
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut store = ParticleStore::new();
        for x in [3.0, 1.0, 2.0] {
            store.push(ball(x));
        }
        let xs: Vec<f64> = store.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_retain_preserves_relative_order() {
        let mut store = ParticleStore::with_capacity(8);
        for x in [5.0, 50.0, 6.0, 60.0, 7.0] {
            store.push(ball(x));
        }
        store.retain(|p| p.x < 10.0);
        let xs: Vec<f64> = (&store).into_iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_clear() {
        let mut store = ParticleStore::new();
        store.push(ball(0.0));
        assert!(!store.is_empty());
        store.clear();
        assert!(store.is_empty());
    }
}
