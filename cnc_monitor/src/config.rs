use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use utilities::config::{ConfigManager, ConfigOrigin, Validate, positive_secs};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    pub data_source_url: String,
    pub update_interval_secs: f32,
    pub request_timeout_secs: f32,

    /// Daily rolling log files are written here in addition to stdout.
    pub log_dir: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            data_source_url: "https://karasevv.com/test/mt_data.json".to_string(),
            update_interval_secs: 5.0,
            request_timeout_secs: 10.0,
            log_dir: None,
        }
    }
}

impl MonitorConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs_f32(self.update_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f32(self.request_timeout_secs)
    }
}

impl Validate for MonitorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.data_source_url.trim().is_empty() {
            return Err("data_source_url must not be empty".to_string());
        }
        positive_secs("update_interval_secs", self.update_interval_secs)?;
        positive_secs("request_timeout_secs", self.request_timeout_secs)?;
        Ok(())
    }
}

pub fn init_config()
-> anyhow::Result<(ConfigManager<MonitorConfig>, MonitorConfig, ConfigOrigin)> {
    let manager = ConfigManager::new();
    let (config, origin) = manager.load_with_origin()?;
    Ok((manager, config, origin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.update_interval(), Duration::from_secs(5));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: MonitorConfig = toml::from_str("update_interval_secs = 1.5").unwrap();
        assert_eq!(config.update_interval_secs, 1.5);
        assert_eq!(
            config.data_source_url,
            MonitorConfig::default().data_source_url
        );
    }

    #[test]
    fn rejects_non_positive_interval() {
        let config = MonitorConfig {
            update_interval_secs: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_intervals_that_do_not_fit_a_duration() {
        let huge = MonitorConfig {
            update_interval_secs: 1e20,
            ..Default::default()
        };
        assert!(huge.validate().is_err());

        let huge_timeout = MonitorConfig {
            request_timeout_secs: 1e20,
            ..Default::default()
        };
        assert!(huge_timeout.validate().is_err());
    }

    #[test]
    fn rejects_intervals_that_round_to_zero() {
        let tiny = MonitorConfig {
            update_interval_secs: 1e-10,
            ..Default::default()
        };
        assert!(tiny.validate().is_err());

        let tiny_timeout = MonitorConfig {
            request_timeout_secs: 1e-10,
            ..Default::default()
        };
        assert!(tiny_timeout.validate().is_err());
    }

    #[test]
    fn rejects_empty_url() {
        let config = MonitorConfig {
            data_source_url: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
