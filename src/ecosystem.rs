//! The simulation state owned by a hosting loop.
//!
//! [`Ecosystem`] bundles particles, the line buffer and the visual records
//! with the engine and projector that update them. It exposes the three
//! lifecycle hooks a host needs: [`Ecosystem::initialize`],
//! [`Ecosystem::tick`] and [`Ecosystem::teardown`].

use glam::Vec3;

use crate::config::EcosystemConfig;
use crate::engine::Engine;
use crate::error::{ConfigError, SimulationError};
use crate::lines::LineBuffer;
use crate::particle::{Particle, ParticleVisual};
use crate::projector::Projector;
use crate::spawn::Spawner;

/// Renderer-facing output of one tick, borrowed from the ecosystem.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Tick number, starting at 1 for the first tick.
    pub tick: u64,
    /// One record per particle, in index order.
    pub visuals: &'a [ParticleVisual],
    /// Whole line buffer: `x, y, z` per endpoint, zeroed past
    /// `line_vertex_count`.
    pub line_vertices: &'a [f32],
    /// Number of meaningful endpoints in `line_vertices`.
    pub line_vertex_count: usize,
}

impl Frame<'_> {
    /// Meaningful part of the line buffer.
    pub fn active_line_vertices(&self) -> &[f32] {
        &self.line_vertices[..self.line_vertex_count * 3]
    }
}

/// Complete simulation state.
pub struct Ecosystem {
    config: EcosystemConfig,
    engine: Engine,
    projector: Projector,
    particles: Vec<Particle>,
    lines: LineBuffer,
    visuals: Vec<ParticleVisual>,
    tick: u64,
    torn_down: bool,
}

impl Ecosystem {
    /// Validate `config` and spawn a fresh particle set.
    ///
    /// Fails before allocating anything if the particle count is outside
    /// `1..=MAX_PARTICLE_COUNT` or any parameter is out of range.
    pub fn initialize(config: EcosystemConfig) -> Result<Self, ConfigError> {
        let count = config.validate()?;
        let particles = Spawner::new(config.spawn).spawn(count);
        log::info!(
            "initialized ecosystem with {} particles (theme {})",
            count,
            config.theme.name()
        );
        Self::build(config, particles)
    }

    /// Build state from an explicit particle set. The set must be non-empty
    /// and match `config.particle_count`.
    pub fn from_particles(
        config: EcosystemConfig,
        particles: Vec<Particle>,
    ) -> Result<Self, ConfigError> {
        let count = config.validate()?;
        if particles.len() != count {
            return Err(ConfigError::ParticleCountMismatch {
                expected: count,
                actual: particles.len(),
            });
        }
        Self::build(config, particles)
    }

    fn build(config: EcosystemConfig, particles: Vec<Particle>) -> Result<Self, ConfigError> {
        let count = particles.len();
        let lines = LineBuffer::for_particles(count)
            .ok_or(ConfigError::InvalidParticleCount(config.particle_count))?;
        Ok(Self {
            engine: Engine::new(config.forces),
            projector: Projector::new(config.projection),
            lines,
            visuals: Vec::with_capacity(count),
            particles,
            tick: 0,
            torn_down: false,
            config,
        })
    }

    /// Advance one tick with the smoothed pointer at `pointer_world`, then
    /// project the result for rendering.
    pub fn tick(&mut self, pointer_world: Vec3) -> Result<Frame<'_>, SimulationError> {
        if self.torn_down {
            return Err(SimulationError::TornDown);
        }

        self.engine
            .step(pointer_world, &mut self.particles, &mut self.lines);
        self.projector
            .project(&self.particles, &mut self.lines, &mut self.visuals);
        self.tick += 1;

        Ok(self.frame())
    }

    /// Output of the latest tick.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            tick: self.tick,
            visuals: &self.visuals,
            line_vertices: self.lines.as_slice(),
            line_vertex_count: self.lines.vertex_count(),
        }
    }

    /// Stop the simulation and release its storage. Later ticks fail with
    /// [`SimulationError::TornDown`]. Calling this twice is harmless.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.particles = Vec::new();
        self.visuals = Vec::new();
        self.lines.release();
        log::info!("ecosystem torn down after {} ticks", self.tick);
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn line_buffer(&self) -> &LineBuffer {
        &self.lines
    }

    pub fn visuals(&self) -> &[ParticleVisual] {
        &self.visuals
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &EcosystemConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(count: i64) -> EcosystemConfig {
        EcosystemConfig::new().with_particle_count(count).with_seed(3)
    }

    #[test]
    fn test_initialize_allocates() {
        let eco = Ecosystem::initialize(small_config(10)).unwrap();
        assert_eq!(eco.particles().len(), 10);
        assert_eq!(
            eco.line_buffer().vertex_capacity(),
            LineBuffer::max_vertices(10).unwrap()
        );
        assert_eq!(eco.tick_count(), 0);
        assert!(eco.visuals().is_empty());
    }

    #[test]
    fn test_initialize_rejects_bad_counts() {
        assert!(matches!(
            Ecosystem::initialize(small_config(0)),
            Err(ConfigError::InvalidParticleCount(0))
        ));
        assert!(matches!(
            Ecosystem::initialize(small_config(-7)),
            Err(ConfigError::InvalidParticleCount(-7))
        ));
    }

    #[test]
    fn test_oversized_count_rejected_before_spawning() {
        assert!(matches!(
            Ecosystem::initialize(small_config(1 << 33)),
            Err(ConfigError::InvalidParticleCount(c)) if c == 1 << 33
        ));
    }

    #[test]
    fn test_from_particles_count_mismatch() {
        let particles = vec![Particle::at_rest(Vec3::ZERO, 1.0)];
        assert!(matches!(
            Ecosystem::from_particles(small_config(2), particles),
            Err(ConfigError::ParticleCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_tick_produces_frame() {
        let mut eco = Ecosystem::initialize(small_config(25)).unwrap();
        let frame = eco.tick(Vec3::ZERO).unwrap();
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.visuals.len(), 25);
        assert_eq!(frame.line_vertex_count % 2, 0);
        assert_eq!(
            frame.active_line_vertices().len(),
            frame.line_vertex_count * 3
        );
        for v in frame.visuals {
            assert!(v.scale >= 1.0);
            assert!((0.2..=1.0).contains(&v.opacity));
        }
    }

    #[test]
    fn test_teardown_blocks_ticks() {
        let mut eco = Ecosystem::initialize(small_config(5)).unwrap();
        eco.tick(Vec3::ZERO).unwrap();
        eco.teardown();
        eco.teardown();
        assert!(eco.is_torn_down());
        assert!(eco.particles().is_empty());
        assert_eq!(eco.line_buffer().vertex_capacity(), 0);
        assert!(matches!(
            eco.tick(Vec3::ZERO),
            Err(SimulationError::TornDown)
        ));
        assert_eq!(eco.tick_count(), 1);
    }
}
