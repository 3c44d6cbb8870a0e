use std::path::PathBuf;

use utilities::{
    config::{ConfigOrigin, create_default_config, should_create_config},
    http_source::HttpSource,
    logging,
};

use crate::{
    config::{MonitorConfig, init_config},
    poller::TelemetryPoller,
};

pub mod config;
pub mod poller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if should_create_config() {
        create_default_config::<MonitorConfig, _>(None::<PathBuf>)?;
    }

    let (config_manager, config, origin) = init_config().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Run with CREATE_CONFIG=1 to create a default configuration file.");
        e
    })?;

    let _log_guard = logging::init("cnc_monitor.log", config.log_dir.as_deref())?;
    if origin == ConfigOrigin::CreatedDefault {
        tracing::info!(path = %config_manager.path().display(), "Created default configuration");
    }
    tracing::info!(path = %config_manager.path().display(), "Configuration loaded");

    let source = HttpSource::new(config.data_source_url.clone(), config.request_timeout());
    let poller = TelemetryPoller::new(source, config.update_interval());

    tokio::select! {
        _ = poller.run() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutting down");
        }
    }

    Ok(())
}
