//! # Interactive Ecosystem
//!
//! A real-time particle swarm that reacts to the pointer.
//!
//! Each particle is pushed away from the pointer, from its close neighbors,
//! and pulled back toward the home position it spawned at. Velocity is
//! damped every tick and integrated with a unit step. Pairs closer than the
//! line radius are drawn as faint connection lines, and every particle is
//! rendered with a size that grows with speed and an opacity that fades
//! with depth.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ecosystem::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     let config = EcosystemConfig::new()
//!         .with_particle_count(150)
//!         .with_theme(Theme::Cyan);
//!
//!     window::run(Ecosystem::initialize(config)?)
//! }
//! ```
//!
//! ## Headless use
//!
//! The simulation core never touches the GPU. Drive it directly and read
//! the render buffers back from each [`Frame`]:
//!
//! ```ignore
//! let mut eco = Ecosystem::initialize(EcosystemConfig::new().with_seed(7))?;
//! let frame = eco.tick(Vec3::new(10.0, 0.0, 0.0))?;
//! println!("{} particles, {} line vertices", frame.visuals.len(), frame.line_vertex_count);
//! eco.teardown();
//! ```
//!
//! ## Tick order
//!
//! | Step | Effect |
//! |------|--------|
//! | Pointer push | within `pointer_radius`, scaled by `1 / mass` |
//! | Pair repulsion | within `repel_radius`, `repel_strength / d` along the offset |
//! | Proximity lines | within `line_radius`, one segment per particle per neighbor |
//! | Home spring | `(home - position) * home_strength` |
//! | Damping | `velocity *= damping` |
//! | Integration | `position += velocity` |
//!
//! Particles are updated in place in index order, so a particle sees the
//! already-moved positions of every particle before it.

pub mod config;
pub mod driver;
pub mod ecosystem;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod lines;
pub mod particle;
pub mod pointer;
pub mod projector;
pub mod spawn;
pub mod theme;
pub mod time;
pub mod window;

pub use bytemuck;
pub use config::{
    EcosystemConfig, ForceParams, PointerParams, ProjectionParams, SpawnParams,
    DEFAULT_PARTICLE_COUNT, MAX_PARTICLE_COUNT,
};
pub use driver::{CancelToken, Driver};
pub use ecosystem::{Ecosystem, Frame};
pub use engine::Engine;
pub use error::{ConfigError, GpuError, SimulationError};
pub use glam::{Vec2, Vec3};
pub use lines::LineBuffer;
pub use particle::{Particle, ParticleVisual};
pub use pointer::{PointerSmoother, PointerTarget, Viewport};
pub use projector::Projector;
pub use spawn::Spawner;
pub use theme::{Palette, Theme};
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use ecosystem::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::EcosystemConfig;
    pub use crate::driver::{CancelToken, Driver};
    pub use crate::ecosystem::{Ecosystem, Frame};
    pub use crate::error::{ConfigError, SimulationError};
    pub use crate::particle::{Particle, ParticleVisual};
    pub use crate::theme::Theme;
    pub use crate::window;
    pub use crate::{Vec2, Vec3};
}
