//! Particle state and its renderer-facing record.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One simulated body.
///
/// `home` and `mass` are fixed at creation. Only the engine moves
/// `position` and `velocity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
    home: Vec3,
    mass: f32,
}

impl Particle {
    /// Create a particle. `mass` must be positive.
    pub fn new(position: Vec3, velocity: Vec3, home: Vec3, mass: f32) -> Self {
        debug_assert!(mass > 0.0, "particle mass must be positive");
        Self {
            position,
            velocity,
            home,
            mass,
        }
    }

    /// A particle at rest on its own home position.
    pub fn at_rest(home: Vec3, mass: f32) -> Self {
        Self::new(home, Vec3::ZERO, home, mass)
    }

    /// Current location.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current velocity.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Spawn anchor the restoring force pulls toward.
    #[inline]
    pub fn home(&self) -> Vec3 {
        self.home
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Speed (velocity magnitude).
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Per-particle visual attributes, laid out for direct upload as an
/// instance buffer.
///
/// WGSL equivalent:
/// ```wgsl
/// struct ParticleVisual {
///     position: vec3<f32>,
///     scale: f32,
///     opacity: f32,
/// }
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleVisual {
    pub position: [f32; 3],
    pub scale: f32,
    pub opacity: f32,
}

impl ParticleVisual {
    /// Position as a glam vector.
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_rest() {
        let home = Vec3::new(1.0, 2.0, 3.0);
        let p = Particle::at_rest(home, 1.5);
        assert_eq!(p.position(), home);
        assert_eq!(p.home(), home);
        assert_eq!(p.velocity(), Vec3::ZERO);
        assert_eq!(p.speed(), 0.0);
        assert_eq!(p.mass(), 1.5);
    }

    #[test]
    fn test_visual_layout() {
        // 5 tightly packed floats, no padding
        assert_eq!(std::mem::size_of::<ParticleVisual>(), 20);
        let v = ParticleVisual {
            position: [1.0, 2.0, 3.0],
            scale: 1.0,
            opacity: 0.5,
        };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 1.0, 0.5]);
    }
}
