//! Simulation engine: forces, integration and connection emission.
//!
//! One call to [`Engine::step`] advances every particle by one tick. The
//! per-particle update order is fixed:
//!
//! 1. pointer push (inside `pointer_radius`, divided by mass)
//! 2. pairwise repulsion against every other particle, emitting a
//!    connection segment for pairs closer than `line_radius`
//! 3. spring back toward home
//! 4. damping
//! 5. explicit Euler integration (`dt` = one tick)
//!
//! Particles are updated in place and in index order, so particle `i` sees
//! the already-moved positions of every particle before it. The pair loop
//! is a straight O(N²) scan over ordered pairs sharing one distance
//! computation between repulsion and line emission; each close pair
//! therefore emits its segment twice, once from each end.

use glam::Vec3;

use crate::config::ForceParams;
use crate::lines::LineBuffer;
use crate::particle::Particle;

/// Advances particle state one tick at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    params: ForceParams,
}

impl Engine {
    /// Create an engine with the given force constants.
    pub fn new(params: ForceParams) -> Self {
        Self { params }
    }

    /// Force constants in use.
    pub fn params(&self) -> &ForceParams {
        &self.params
    }

    /// Advance all particles by one tick.
    ///
    /// `pointer` is the smoothed pointer in world space. The line buffer
    /// is restarted and refilled with this tick's connections; its tail is
    /// left for [`Projector::project`](crate::projector::Projector::project)
    /// to clear.
    pub fn step(&self, pointer: Vec3, particles: &mut [Particle], lines: &mut LineBuffer) {
        let params = &self.params;
        lines.begin();

        for i in 0..particles.len() {
            let current = particles[i];
            let position = current.position;
            let mut velocity = current.velocity;

            velocity += pointer_push(params, position, current.mass(), pointer);

            for (j, other) in particles.iter().enumerate() {
                if i == j {
                    continue;
                }
                let offset = position - other.position;
                let distance = offset.length();
                // Coincident pairs are skipped: no direction to push along.
                if distance > 0.0 && distance < params.repel_radius {
                    velocity += offset / distance * (params.repel_strength / distance);
                    if distance < params.line_radius {
                        lines.push_segment(position, other.position);
                    }
                }
            }

            velocity += (current.home() - position) * params.home_strength;
            velocity *= params.damping;

            let particle = &mut particles[i];
            particle.velocity = velocity;
            particle.position = position + velocity;
        }

        log::trace!(
            "step: {} particles, {} line segments",
            particles.len(),
            lines.segment_count()
        );
    }
}

/// Velocity change from the pointer for a particle at `position`.
///
/// Linear falloff to zero at `pointer_radius`, hard cut beyond it. A
/// particle exactly on the pointer gets no push.
pub fn pointer_push(params: &ForceParams, position: Vec3, mass: f32, pointer: Vec3) -> Vec3 {
    let offset = position - pointer;
    let influence = (params.pointer_radius - offset.length()).max(0.0);
    if influence > 0.0 {
        offset.normalize_or_zero() * (influence * params.pointer_strength / mass)
    } else {
        Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAR: Vec3 = Vec3::new(1000.0, 1000.0, 0.0);

    fn step_once(particles: &mut [Particle], pointer: Vec3) -> LineBuffer {
        let mut lines = LineBuffer::for_particles(particles.len()).unwrap();
        Engine::default().step(pointer, particles, &mut lines);
        lines
    }

    #[test]
    fn test_pointer_push_outside_radius() {
        let params = ForceParams::default();
        let push = pointer_push(&params, Vec3::new(31.0, 0.0, 0.0), 1.0, Vec3::ZERO);
        assert_eq!(push, Vec3::ZERO);
        // Exactly on the boundary: zero influence
        let push = pointer_push(&params, Vec3::new(30.0, 0.0, 0.0), 1.0, Vec3::ZERO);
        assert_eq!(push, Vec3::ZERO);
    }

    #[test]
    fn test_pointer_push_inside_radius() {
        let params = ForceParams::default();
        let push = pointer_push(&params, Vec3::new(10.0, 0.0, 0.0), 2.0, Vec3::ZERO);
        // (30 - 10) * 0.008 / 2 = 0.08 along +x
        assert!((push.x - 0.08).abs() < 1e-6);
        assert_eq!(push.y, 0.0);
        assert_eq!(push.z, 0.0);
    }

    #[test]
    fn test_pointer_on_particle_is_finite() {
        let params = ForceParams::default();
        let push = pointer_push(&params, Vec3::ZERO, 1.0, Vec3::ZERO);
        assert_eq!(push, Vec3::ZERO);
    }

    #[test]
    fn test_isolated_particle_at_rest_stays_put() {
        let mut particles = [Particle::at_rest(Vec3::ZERO, 1.0)];
        let lines = step_once(&mut particles, FAR);
        assert_eq!(particles[0].position(), Vec3::ZERO);
        assert_eq!(particles[0].velocity(), Vec3::ZERO);
        assert_eq!(lines.vertex_count(), 0);
    }

    #[test]
    fn test_home_spring_and_damping() {
        let mut particles = [Particle::new(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::ZERO,
            1.0,
        )];
        step_once(&mut particles, FAR);
        // v = (0 - 10) * 0.001 * 0.95
        let expected_v = -10.0 * 0.001 * 0.95;
        assert!((particles[0].velocity().x - expected_v).abs() < 1e-7);
        assert!((particles[0].position().x - (10.0 + expected_v)).abs() < 1e-6);
    }

    #[test]
    fn test_damping_only() {
        let mut particles = [Particle::new(Vec3::ZERO, Vec3::X, Vec3::ZERO, 1.0)];
        // Home force is zero on the first step (position == home)
        step_once(&mut particles, FAR);
        assert!((particles[0].velocity().x - 0.95).abs() < 1e-6);
        assert!((particles[0].position().x - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_pair_repulsion_and_lines() {
        let a = Vec3::new(-5.0, 0.0, 0.0);
        let b = Vec3::new(5.0, 0.0, 0.0);
        let mut particles = [Particle::at_rest(a, 1.0), Particle::at_rest(b, 1.0)];
        let lines = step_once(&mut particles, FAR);

        assert!(particles[0].velocity().x < 0.0);
        assert!(particles[1].velocity().x > 0.0);
        assert_eq!(particles[0].velocity().y, 0.0);

        assert_eq!(lines.vertex_count(), 4);
        let segs: Vec<_> = lines.segments().collect();
        // First segment from particle 0's point of view, before it moved
        assert_eq!(segs[0], (a, b));
        // Second from particle 1, which sees particle 0's new position
        assert_eq!(segs[1].0, b);
        assert_eq!(segs[1].1, particles[0].position());
    }

    #[test]
    fn test_repulsion_without_line_between_radii() {
        let mut particles = [
            Particle::at_rest(Vec3::ZERO, 1.0),
            Particle::at_rest(Vec3::new(13.0, 0.0, 0.0), 1.0),
        ];
        let lines = step_once(&mut particles, FAR);
        assert_eq!(lines.vertex_count(), 0);
        assert!(particles[0].velocity().x < 0.0);
    }

    #[test]
    fn test_no_interaction_beyond_repel_radius() {
        let mut particles = [
            Particle::at_rest(Vec3::ZERO, 1.0),
            Particle::at_rest(Vec3::new(15.0, 0.0, 0.0), 1.0),
        ];
        let lines = step_once(&mut particles, FAR);
        assert_eq!(lines.vertex_count(), 0);
        assert_eq!(particles[0].velocity(), Vec3::ZERO);
        assert_eq!(particles[1].velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_coincident_pair_skipped() {
        let p = Vec3::new(3.0, 4.0, 5.0);
        let mut particles = [Particle::at_rest(p, 1.0), Particle::at_rest(p, 2.0)];
        let lines = step_once(&mut particles, FAR);
        assert_eq!(lines.vertex_count(), 0);
        for particle in &particles {
            assert_eq!(particle.velocity(), Vec3::ZERO);
            assert!(particle.position().is_finite());
        }
    }

    #[test]
    fn test_coincident_pair_separates_once_partner_moves() {
        // Both start on (1, 1, 1) but particle 0's home spring moves it
        // first, so particle 1 sees a tiny nonzero distance.
        let p = Vec3::ONE;
        let mut particles = [
            Particle::new(p, Vec3::ZERO, Vec3::new(5.0, 1.0, 1.0), 1.0),
            Particle::at_rest(p, 1.0),
        ];
        let lines = step_once(&mut particles, FAR);

        let moved = particles[0].position();
        assert!((moved.x - (1.0 + 4.0 * 0.001 * 0.95)).abs() < 1e-6);

        // Particle 0 saw a coincident partner: no segment from it.
        // Particle 1 saw d ≈ 0.0038: one segment and a strong push in -x.
        assert_eq!(lines.segment_count(), 1);
        let segs: Vec<_> = lines.segments().collect();
        assert_eq!(segs[0], (p, moved));
        assert!(particles[1].velocity().x < -1.0);
        assert!(particles[1].position().is_finite());
    }

    #[test]
    fn test_sequential_update_order() {
        // The pointer shoves particle 0 before particle 1 is visited, so
        // particle 1's segment must end at particle 0's new position.
        let mut particles = [
            Particle::at_rest(Vec3::new(0.0, 0.0, 0.0), 1.0),
            Particle::at_rest(Vec3::new(10.0, 0.0, 0.0), 1.0),
        ];
        let pointer = Vec3::new(-5.0, 0.0, 0.0);
        let before_0 = particles[0].position();
        let lines = step_once(&mut particles, pointer);
        let segs: Vec<_> = lines.segments().collect();
        assert_eq!(segs[0].0, before_0);
        assert_ne!(segs[1].1, before_0);
        assert_eq!(segs[1].1, particles[0].position());
    }

    #[test]
    fn test_mass_and_home_unchanged() {
        let mut particles = [
            Particle::new(Vec3::ZERO, Vec3::ONE, Vec3::X, 0.7),
            Particle::new(Vec3::Y, -Vec3::ONE, Vec3::Z, 1.9),
        ];
        let mut lines = LineBuffer::for_particles(2).unwrap();
        let engine = Engine::default();
        for _ in 0..100 {
            engine.step(Vec3::ZERO, &mut particles, &mut lines);
        }
        assert_eq!(particles[0].mass(), 0.7);
        assert_eq!(particles[0].home(), Vec3::X);
        assert_eq!(particles[1].mass(), 1.9);
        assert_eq!(particles[1].home(), Vec3::Z);
    }
}
