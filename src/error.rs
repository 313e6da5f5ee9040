//! Error types for the ecosystem.
//!
//! The simulation itself never fails mid-tick: numeric edge cases are
//! handled with branch guards. Errors only surface from configuration,
//! lifecycle misuse, and the windowing/GPU host.

use thiserror::Error;

/// Errors raised while building or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Particle count was zero, negative or above the supported maximum.
    #[error(
        "invalid particle count {0}: expected 1 to {max}",
        max = crate::config::MAX_PARTICLE_COUNT
    )]
    InvalidParticleCount(i64),

    /// A numeric parameter was non-finite or outside its valid range.
    #[error("invalid value {value} for parameter `{name}`")]
    InvalidParameter {
        /// Parameter name as it appears in the configuration.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// An explicit particle set did not match the configured count.
    #[error("expected {expected} particles, got {actual}")]
    ParticleCountMismatch {
        /// Count from the configuration.
        expected: usize,
        /// Number of particles supplied.
        actual: usize,
    },

    /// Failed to read a configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a configuration file.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found")]
    NoAdapter,

    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),

    /// A buffer would exceed the device's size limit.
    #[error("{label} needs {requested} bytes, device allows {limit}")]
    BufferTooLarge {
        /// Which buffer.
        label: &'static str,
        /// Bytes needed.
        requested: u64,
        /// Device `max_buffer_size`.
        limit: u64,
    },
}

/// Errors that can occur while running a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A tick was requested after teardown began.
    #[error("simulation has been torn down")]
    TornDown,

    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed to create event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_count_message() {
        let err = ConfigError::InvalidParticleCount(-3);
        assert!(err.to_string().contains("-3"));
        assert!(err.to_string().contains("3000"));
    }

    #[test]
    fn test_config_error_wraps_into_simulation_error() {
        let err: SimulationError = ConfigError::InvalidParticleCount(0).into();
        assert!(matches!(
            err,
            SimulationError::Config(ConfigError::InvalidParticleCount(0))
        ));
        // transparent keeps the inner message
        assert_eq!(
            err.to_string(),
            ConfigError::InvalidParticleCount(0).to_string()
        );
    }
}
