use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use utilities::config::{ConfigManager, ConfigOrigin, Validate, positive_secs};

use crate::{controller::ControllerTiming, models::Vec3};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ControllerConfig {
    pub config_url: String,
    pub check_interval_secs: f32,
    pub request_timeout_secs: f32,
    pub frame_interval_ms: u64,
    pub show_debug: bool,

    /// Bounds in force until the first config arrives.
    pub initial_min_y: f32,
    pub initial_max_y: f32,

    pub status_interval_secs: f32,
    pub log_dir: Option<PathBuf>,

    pub start_position: Vec3,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            config_url: "https://lab3-2-5bea.onrender.com/".to_string(),
            check_interval_secs: 0.1,
            request_timeout_secs: 10.0,
            frame_interval_ms: 16,
            show_debug: true,

            initial_min_y: 0.0,
            initial_max_y: 1.063,

            status_interval_secs: 1.0,
            log_dir: None,

            start_position: Vec3::default(),
        }
    }
}

impl ControllerConfig {
    pub fn timing(&self) -> ControllerTiming {
        ControllerTiming {
            check_interval: Duration::from_secs_f32(self.check_interval_secs),
            frame_interval: Duration::from_millis(self.frame_interval_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f32(self.request_timeout_secs)
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_secs_f32(self.status_interval_secs)
    }
}

impl Validate for ControllerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.config_url.trim().is_empty() {
            return Err("config_url must not be empty".to_string());
        }
        positive_secs("check_interval_secs", self.check_interval_secs)?;
        positive_secs("request_timeout_secs", self.request_timeout_secs)?;
        positive_secs("status_interval_secs", self.status_interval_secs)?;
        if self.frame_interval_ms == 0 {
            return Err("frame_interval_ms must be greater than zero".to_string());
        }
        Ok(())
    }
}

pub fn init_config()
-> anyhow::Result<(ConfigManager<ControllerConfig>, ControllerConfig, ConfigOrigin)> {
    let manager = ConfigManager::new();
    let (config, origin) = manager.load_with_origin()?;
    Ok((manager, config, origin))
}
