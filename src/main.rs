use std::process::ExitCode;

use ecosystem::{window, Ecosystem, EcosystemConfig, SimulationError};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match EcosystemConfig::load(&path) {
            Ok(config) => {
                log::info!("loaded config from {}", path);
                config
            }
            Err(e) => {
                log::error!("failed to load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => EcosystemConfig::default(),
    };

    let result = Ecosystem::initialize(config)
        .map_err(SimulationError::from)
        .and_then(window::run);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
