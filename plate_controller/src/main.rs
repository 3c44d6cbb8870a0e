use std::path::PathBuf;

use utilities::{
    config::{ConfigOrigin, create_default_config, should_create_config},
    http_source::HttpSource,
    logging,
};

use crate::{
    config::{ControllerConfig, init_config},
    controller::MotionController,
    plate::VirtualPlate,
    state_monitor::run_state_monitor,
};

pub mod config;
pub mod controller;
pub mod models;
pub mod plate;
pub mod state_monitor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if should_create_config() {
        create_default_config::<ControllerConfig, _>(None::<PathBuf>)?;
    }

    let (config_manager, config, origin) = init_config().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Run with CREATE_CONFIG=1 to create a default configuration file.");
        e
    })?;

    let _log_guard = logging::init("plate_controller.log", config.log_dir.as_deref())?;
    if origin == ConfigOrigin::CreatedDefault {
        tracing::info!(path = %config_manager.path().display(), "Created default configuration");
    }
    tracing::info!(path = %config_manager.path().display(), "Configuration loaded");

    let plate = VirtualPlate::new(config.start_position);
    let source = HttpSource::new(config.config_url.clone(), config.request_timeout());

    let mut controller = MotionController::new(
        source,
        plate.clone(),
        (config.initial_min_y, config.initial_max_y),
        config.timing(),
        config.show_debug,
    );

    let moving = controller.state().moving_flag();
    let monitor = run_state_monitor(plate, moving, config.status_interval());

    tokio::select! {
        _ = controller.run() => {}
        _ = monitor => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutting down");
        }
    }

    Ok(())
}
