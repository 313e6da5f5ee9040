//! Initial particle generation.
//!
//! Every particle gets an independently drawn position, home, velocity and
//! mass. Positions and homes come from the same box but are separate
//! draws, so the swarm starts displaced and relaxes toward its anchors.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::SpawnParams;
use crate::particle::Particle;

/// Seeded generator for the initial particle set.
pub struct Spawner {
    params: SpawnParams,
    rng: SmallRng,
}

impl Spawner {
    /// Create a spawner. Uses `params.seed` if set, otherwise a clock-derived
    /// seed so every run differs.
    pub fn new(params: SpawnParams) -> Self {
        let seed = params.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });
        log::debug!("spawner seed {}", seed);

        Self {
            params,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random vector with each component in `[-extent / 2, extent / 2)`.
    pub fn random_centered(&mut self, extent: Vec3) -> Vec3 {
        Vec3::new(
            (self.random() - 0.5) * extent.x,
            (self.random() - 0.5) * extent.y,
            (self.random() - 0.5) * extent.z,
        )
    }

    /// Draw one particle.
    pub fn particle(&mut self) -> Particle {
        let position = self.random_centered(self.params.position_extent);
        let velocity = self.random_centered(self.params.velocity_extent);
        let home = self.random_centered(self.params.position_extent);
        let mass = self.params.mass_min + self.random() * self.params.mass_range;
        Particle::new(position, velocity, home, mass)
    }

    /// Draw `count` particles.
    pub fn spawn(&mut self, count: usize) -> Vec<Particle> {
        (0..count).map(|_| self.particle()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Spawner {
        Spawner::new(SpawnParams {
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn test_spawn_within_ranges() {
        let mut spawner = seeded(1);
        let particles = spawner.spawn(500);
        assert_eq!(particles.len(), 500);
        for p in &particles {
            for v in [p.position(), p.home()] {
                assert!(v.x >= -50.0 && v.x < 50.0);
                assert!(v.y >= -50.0 && v.y < 50.0);
                assert!(v.z >= -25.0 && v.z < 25.0);
            }
            let vel = p.velocity();
            assert!(vel.x.abs() <= 0.1 && vel.y.abs() <= 0.1 && vel.z.abs() <= 0.05);
            assert!(p.mass() >= 0.5 && p.mass() < 2.0);
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = seeded(99).spawn(20);
        let b = seeded(99).spawn(20);
        let c = seeded(100).spawn(20);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_home_is_independent_of_position() {
        let particles = seeded(5).spawn(50);
        assert!(particles.iter().any(|p| p.position() != p.home()));
    }
}
