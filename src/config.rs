//! Simulation configuration.
//!
//! [`EcosystemConfig`] gathers every tunable of the ecosystem. Defaults
//! reproduce the reference behavior exactly; builder methods and JSON
//! loading exist for hosts that want to tweak it.
//!
//! ```ignore
//! let config = EcosystemConfig::new()
//!     .with_particle_count(300)
//!     .with_seed(7)
//!     .with_theme(Theme::Cyan);
//! let eco = Ecosystem::initialize(config)?;
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::theme::Theme;

/// Default number of simulated particles.
pub const DEFAULT_PARTICLE_COUNT: i64 = 150;

/// Largest accepted particle count. The worst-case line buffer grows as
/// `24·N·(N−1)` bytes and must fit in one default-limit GPU buffer (256 MiB).
pub const MAX_PARTICLE_COUNT: i64 = 3000;

/// Force constants used by the simulation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceParams {
    /// Pointer influence radius in world units.
    pub pointer_radius: f32,
    /// Pointer push strength, scaled by remaining influence and divided by mass.
    pub pointer_strength: f32,
    /// Pairwise repulsion radius.
    pub repel_radius: f32,
    /// Pairwise repulsion strength (divided by distance).
    pub repel_strength: f32,
    /// Distance under which a pair emits a connection line.
    /// Must not exceed `repel_radius`.
    pub line_radius: f32,
    /// Spring constant pulling particles toward home.
    pub home_strength: f32,
    /// Per-tick velocity multiplier.
    pub damping: f32,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            pointer_radius: 30.0,
            pointer_strength: 0.008,
            repel_radius: 15.0,
            repel_strength: 0.01,
            line_radius: 12.0,
            home_strength: 0.001,
            damping: 0.95,
        }
    }
}

impl ForceParams {
    fn validate(&self) -> Result<(), ConfigError> {
        check_positive("forces.pointer_radius", self.pointer_radius)?;
        check_finite("forces.pointer_strength", self.pointer_strength)?;
        check_positive("forces.repel_radius", self.repel_radius)?;
        check_finite("forces.repel_strength", self.repel_strength)?;
        check_positive("forces.line_radius", self.line_radius)?;
        if self.line_radius > self.repel_radius {
            return Err(ConfigError::InvalidParameter {
                name: "forces.line_radius",
                value: self.line_radius,
            });
        }
        check_finite("forces.home_strength", self.home_strength)?;
        check_range("forces.damping", self.damping, 0.0, 1.0)
    }
}

/// Mapping from simulation state to visual attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionParams {
    /// Scale gained per unit of speed (`scale = 1 + speed_scale * |v|`).
    pub speed_scale: f32,
    /// Depth mapped to `opacity_near`.
    pub z_near: f32,
    /// Depth mapped to `opacity_far`.
    pub z_far: f32,
    /// Opacity at `z_near` before clamping.
    pub opacity_near: f32,
    /// Opacity at `z_far` before clamping.
    pub opacity_far: f32,
    /// Lower clamp bound for opacity.
    pub opacity_min: f32,
    /// Upper clamp bound for opacity.
    pub opacity_max: f32,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            speed_scale: 2.0,
            z_near: -25.0,
            z_far: 25.0,
            opacity_near: 0.3,
            opacity_far: 1.0,
            opacity_min: 0.2,
            opacity_max: 1.0,
        }
    }
}

impl ProjectionParams {
    fn validate(&self) -> Result<(), ConfigError> {
        check_finite("projection.speed_scale", self.speed_scale)?;
        check_finite("projection.z_near", self.z_near)?;
        check_finite("projection.z_far", self.z_far)?;
        if self.z_near == self.z_far {
            return Err(ConfigError::InvalidParameter {
                name: "projection.z_far",
                value: self.z_far,
            });
        }
        check_finite("projection.opacity_near", self.opacity_near)?;
        check_finite("projection.opacity_far", self.opacity_far)?;
        check_range("projection.opacity_min", self.opacity_min, 0.0, 1.0)?;
        check_range("projection.opacity_max", self.opacity_max, self.opacity_min, 1.0)
    }
}

/// Initial particle distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnParams {
    /// Full extent of the spawn box; positions and homes fall in `±extent / 2`.
    pub position_extent: Vec3,
    /// Full extent of initial velocities; components fall in `±extent / 2`.
    pub velocity_extent: Vec3,
    /// Smallest mass.
    pub mass_min: f32,
    /// Mass spread above `mass_min`.
    pub mass_range: f32,
    /// Fixed RNG seed. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            position_extent: Vec3::new(100.0, 100.0, 50.0),
            velocity_extent: Vec3::new(0.2, 0.2, 0.1),
            mass_min: 0.5,
            mass_range: 1.5,
            seed: None,
        }
    }
}

impl SpawnParams {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, v) in [
            ("spawn.position_extent", self.position_extent),
            ("spawn.velocity_extent", self.velocity_extent),
        ] {
            for c in v.to_array() {
                if !c.is_finite() || c < 0.0 {
                    return Err(ConfigError::InvalidParameter { name, value: c });
                }
            }
        }
        check_positive("spawn.mass_min", self.mass_min)?;
        check_finite("spawn.mass_range", self.mass_range)?;
        if self.mass_range < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "spawn.mass_range",
                value: self.mass_range,
            });
        }
        Ok(())
    }
}

/// Pointer mapping and smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerParams {
    /// World units per normalized viewport unit.
    pub world_scale: f32,
    /// Low-pass factor applied once per tick.
    pub smoothing: f32,
}

impl Default for PointerParams {
    fn default() -> Self {
        Self {
            world_scale: 50.0,
            smoothing: 0.05,
        }
    }
}

impl PointerParams {
    fn validate(&self) -> Result<(), ConfigError> {
        check_finite("pointer.world_scale", self.world_scale)?;
        // Zero would freeze the pointer in place
        if self.smoothing > 0.0 && self.smoothing <= 1.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidParameter {
                name: "pointer.smoothing",
                value: self.smoothing,
            })
        }
    }
}

/// Complete ecosystem configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcosystemConfig {
    /// Number of particles. Signed so that bad input can be reported
    /// instead of wrapping.
    pub particle_count: i64,
    /// Engine force constants.
    pub forces: ForceParams,
    /// Visual attribute mapping.
    pub projection: ProjectionParams,
    /// Initial distribution.
    pub spawn: SpawnParams,
    /// Pointer mapping.
    pub pointer: PointerParams,
    /// Color palette for the viewer.
    pub theme: Theme,
}

impl Default for EcosystemConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            forces: ForceParams::default(),
            projection: ProjectionParams::default(),
            spawn: SpawnParams::default(),
            pointer: PointerParams::default(),
            theme: Theme::default(),
        }
    }
}

impl EcosystemConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: i64) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the force constants.
    pub fn with_forces(mut self, forces: ForceParams) -> Self {
        self.forces = forces;
        self
    }

    /// Set the visual attribute mapping.
    pub fn with_projection(mut self, projection: ProjectionParams) -> Self {
        self.projection = projection;
        self
    }

    /// Set the spawn distribution.
    pub fn with_spawn(mut self, spawn: SpawnParams) -> Self {
        self.spawn = spawn;
        self
    }

    /// Fix the spawn RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.spawn.seed = Some(seed);
        self
    }

    /// Set the pointer mapping.
    pub fn with_pointer(mut self, pointer: PointerParams) -> Self {
        self.pointer = pointer;
        self
    }

    /// Set the viewer palette.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Particle count as a buffer length. Accepts `1..=MAX_PARTICLE_COUNT`.
    pub fn particle_count(&self) -> Result<usize, ConfigError> {
        if !(1..=MAX_PARTICLE_COUNT).contains(&self.particle_count) {
            return Err(ConfigError::InvalidParticleCount(self.particle_count));
        }
        usize::try_from(self.particle_count)
            .map_err(|_| ConfigError::InvalidParticleCount(self.particle_count))
    }

    /// Check every parameter. Returns the validated particle count.
    pub fn validate(&self) -> Result<usize, ConfigError> {
        let count = self.particle_count()?;
        self.forces.validate()?;
        self.projection.validate()?;
        self.spawn.validate()?;
        self.pointer.validate()?;
        Ok(count)
    }
}

fn check_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
