use std::{
    fs,
    marker::PhantomData,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found at {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read configuration file: {source}")]
    ReadError { source: std::io::Error },

    #[error("Failed to parse configuration: {source}")]
    ParseError { source: toml::de::Error },

    #[error("Failed to serialize configuration: {source}")]
    SerializeError { source: toml::ser::Error },

    #[error("Failed to write configuration file: {source}")]
    WriteError { source: std::io::Error },

    #[error("Configuration validation failed: {message}")]
    ValidationError { message: String },
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    File,
    CreatedDefault,
}

/// Converts seconds to a `Duration`, rejecting anything that overflows or rounds down to zero.
pub fn positive_secs(name: &str, value: f32) -> Result<Duration, String> {
    Duration::try_from_secs_f32(value)
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or_else(|| format!("{name} must be a positive number of seconds, got {value}"))
}

/// Sanity checks a configuration must pass after loading.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Debug)]
pub struct ConfigOptions {
    pub config_path: PathBuf,
    pub create_if_missing: bool,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            config_path: Self::default_config_path(),
            create_if_missing: true,
        }
    }
}

impl ConfigOptions {
    pub fn default_config_path() -> PathBuf {
        std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("default_config.toml"))
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }
}

#[derive(Debug)]
pub struct ConfigManager<T> {
    options: ConfigOptions,
    _config: PhantomData<T>,
}

impl<T> ConfigManager<T>
where
    T: Default + Serialize + DeserializeOwned + Validate,
{
    pub fn new() -> Self {
        Self::with_options(ConfigOptions::default())
    }

    pub fn with_options(options: ConfigOptions) -> Self {
        Self {
            options,
            _config: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.options.config_path
    }

    pub fn load(&self) -> Result<T, ConfigError> {
        self.load_with_origin().map(|(config, _)| config)
    }

    pub fn load_with_origin(&self) -> Result<(T, ConfigOrigin), ConfigError> {
        let config_path = &self.options.config_path;

        if !config_path.exists() {
            if self.options.create_if_missing {
                let default_config = T::default();
                self.save(&default_config)?;
                return Ok((default_config, ConfigOrigin::CreatedDefault));
            }

            return Err(ConfigError::FileNotFound {
                path: config_path.clone(),
            });
        }

        let content =
            fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError { source: e })?;

        let config: T =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError { source: e })?;

        config
            .validate()
            .map_err(|message| ConfigError::ValidationError { message })?;

        Ok((config, ConfigOrigin::File))
    }

    pub fn save(&self, config: &T) -> Result<(), ConfigError> {
        let config_path = &self.options.config_path;

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError { source: e })?;
            }
        }

        let content = toml::to_string_pretty(config)
            .map_err(|e| ConfigError::SerializeError { source: e })?;

        fs::write(config_path, content).map_err(|e| ConfigError::WriteError { source: e })?;

        Ok(())
    }
}

impl<T> Default for ConfigManager<T>
where
    T: Default + Serialize + DeserializeOwned + Validate,
{
    fn default() -> Self {
        Self::new()
    }
}

pub fn should_create_config() -> bool {
    std::env::var("CREATE_CONFIG")
        .map(|val| val == "1" || val.to_lowercase() == "true")
        .unwrap_or(false)
}

pub fn create_default_config<T, P>(path: Option<P>) -> Result<(), ConfigError>
where
    T: Default + Serialize + DeserializeOwned + Validate,
    P: AsRef<Path>,
{
    let config_path = path
        .map(|p| p.as_ref().to_path_buf())
        .unwrap_or_else(ConfigOptions::default_config_path);

    let manager = ConfigManager::<T>::with_options(ConfigOptions {
        config_path,
        create_if_missing: true,
    });

    manager.save(&T::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct SampleConfig {
        url: String,
        interval_secs: f32,
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self {
                url: "http://localhost/".to_string(),
                interval_secs: 1.0,
            }
        }
    }

    impl Validate for SampleConfig {
        fn validate(&self) -> Result<(), String> {
            if self.interval_secs <= 0.0 {
                return Err("interval_secs must be positive".to_string());
            }
            Ok(())
        }
    }

    fn manager(path: &Path, create_if_missing: bool) -> ConfigManager<SampleConfig> {
        ConfigManager::with_options(ConfigOptions {
            create_if_missing,
            ..ConfigOptions::with_path(path)
        })
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = manager(&path, true).load().unwrap();
        assert_eq!(config, SampleConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn origin_tracks_whether_file_was_created() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(&dir.path().join("config.toml"), true);

        let (_, first) = manager.load_with_origin().unwrap();
        let (_, second) = manager.load_with_origin().unwrap();

        assert_eq!(first, ConfigOrigin::CreatedDefault);
        assert_eq!(second, ConfigOrigin::File);
    }

    #[test]
    fn positive_secs_rejects_overflow_and_zero_rounding() {
        assert_eq!(
            positive_secs("interval", 0.5),
            Ok(Duration::from_millis(500))
        );
        assert!(positive_secs("interval", 1e20).is_err());
        assert!(positive_secs("interval", 1e-10).is_err());
        assert!(positive_secs("interval", 0.0).is_err());
        assert!(positive_secs("interval", -1.0).is_err());
        assert!(positive_secs("interval", f32::NAN).is_err());
        assert!(positive_secs("interval", f32::INFINITY).is_err());
    }

    #[test]
    fn missing_file_without_create_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let err = manager(&path, false).load().unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let manager = manager(&path, false);

        let config = SampleConfig {
            url: "http://example.com/state.json".to_string(),
            interval_secs: 2.5,
        };
        manager.save(&config).unwrap();

        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "url = \"http://x/\"\ninterval_secs = 0.0\n").unwrap();

        let err = manager(&path, false).load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "url = [").unwrap();

        let err = manager(&path, false).load().unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
