//! Render-buffer projection.
//!
//! Turns post-step particle state into the per-particle records a renderer
//! draws ([`ParticleVisual`]) and finalizes the line buffer by zeroing
//! everything past this tick's last segment. Holds no state across ticks.

use glam::Vec3;

use crate::config::ProjectionParams;
use crate::lines::LineBuffer;
use crate::particle::{Particle, ParticleVisual};

/// Derives visual attributes from simulation state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projector {
    params: ProjectionParams,
}

impl Projector {
    pub fn new(params: ProjectionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Rebuild `visuals` from `particles` and trim `lines`.
    ///
    /// `visuals` ends up with exactly one entry per particle, in index order.
    pub fn project(
        &self,
        particles: &[Particle],
        lines: &mut LineBuffer,
        visuals: &mut Vec<ParticleVisual>,
    ) {
        visuals.clear();
        visuals.extend(particles.iter().map(|p| self.visual(p)));
        lines.trim();
    }

    /// Visual record for a single particle.
    pub fn visual(&self, particle: &Particle) -> ParticleVisual {
        ParticleVisual {
            position: particle.position().to_array(),
            scale: self.scale(particle.speed()),
            opacity: self.opacity(particle.position().z),
        }
    }

    /// `1 + speed_scale * speed`. Unbounded above.
    #[inline]
    pub fn scale(&self, speed: f32) -> f32 {
        1.0 + speed * self.params.speed_scale
    }

    /// Depth fade: linear map of `z`, then clamped. The map alone
    /// extrapolates past `z_near`/`z_far`; the clamp is what bounds it.
    #[inline]
    pub fn opacity(&self, z: f32) -> f32 {
        let p = &self.params;
        map_linear(z, p.z_near, p.z_far, p.opacity_near, p.opacity_far)
            .clamp(p.opacity_min, p.opacity_max)
    }
}

/// Unclamped linear remap of `x` from `[a1, a2]` onto `[b1, b2]`.
#[inline]
pub fn map_linear(x: f32, a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}

/// Scale for `velocity` under the default mapping.
pub fn speed_scale(velocity: Vec3) -> f32 {
    Projector::default().scale(velocity.length())
}

/// Opacity for depth `z` under the default mapping.
pub fn depth_opacity(z: f32) -> f32 {
    Projector::default().opacity(z)
}
