//! Configuration module for tagset
//!
//! Stores user defaults (insertion placement, image extensions, log level).
//! Configuration lives in the user's config directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::dataset::DEFAULT_IMAGE_EXTENSIONS;
use crate::tags::AddPosition;

/// Keys accepted by `config get` / `config set`
pub const CONFIG_KEYS: [&str; 5] = [
    "quiet",
    "placement",
    "custom_position",
    "image_extensions",
    "log_level",
];

/// Default place for tags added to every item
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Front of the list
    Top,
    /// Middle of the list
    Center,
    /// End of the list
    #[default]
    Down,
    /// A fixed index (see `custom_position`)
    Custom,
}

impl Placement {
    /// Pair with an index to get a concrete insertion policy
    #[must_use]
    pub const fn with_index(self, index: i64) -> AddPosition {
        match self {
            Self::Top => AddPosition::Top,
            Self::Center => AddPosition::Center,
            Self::Down => AddPosition::Down,
            Self::Custom => AddPosition::Custom(index),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Down => "down",
            Self::Custom => "custom",
        }
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_IMAGE_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TagsetConfig {
    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Where `add` puts a tag when no placement is given
    #[serde(default)]
    pub placement: Placement,

    /// Index used with the `custom` placement
    #[serde(default)]
    pub custom_position: i64,

    /// Image extensions a folder load picks up
    #[serde(default = "default_extensions")]
    pub image_extensions: Vec<String>,

    /// `tracing` filter directive, e.g. `info` or `tagset=debug`
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for TagsetConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            placement: Placement::default(),
            custom_position: 0,
            image_extensions: default_extensions(),
            log_level: None,
        }
    }
}

impl TagsetConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("tagset").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Default insertion policy for `add`
    #[must_use]
    pub const fn add_position(&self) -> AddPosition {
        self.placement.with_index(self.custom_position)
    }

    /// Render one key's value as text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        Ok(match key {
            "quiet" => self.quiet.to_string(),
            "placement" => self.placement.as_str().to_string(),
            "custom_position" => self.custom_position.to_string(),
            "image_extensions" => self.image_extensions.join(","),
            "log_level" => self.log_level.clone().unwrap_or_default(),
            _ => return Err(unknown_key(key)),
        })
    }

    /// Parse and assign one key from text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or a value that doesn't parse.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "quiet" => {
                self.quiet = value.parse().map_err(|_| {
                    ConfigError::Message(format!("Invalid value for quiet: '{value}'. Use 'true' or 'false'"))
                })?;
            }
            "placement" => {
                self.placement = Placement::from_str(value, true).map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for placement: '{value}'. Use top, center, down or custom"
                    ))
                })?;
            }
            "custom_position" => {
                self.custom_position = value.parse().map_err(|_| {
                    ConfigError::Message(format!("Invalid value for custom_position: '{value}'"))
                })?;
            }
            "image_extensions" => {
                let extensions: Vec<String> = value
                    .split(',')
                    .map(|e| e.trim().trim_start_matches('.').to_lowercase())
                    .filter(|e| !e.is_empty())
                    .collect();
                if extensions.is_empty() {
                    return Err(ConfigError::Message(
                        "image_extensions needs at least one extension".into(),
                    ));
                }
                self.image_extensions = extensions;
            }
            "log_level" => {
                self.log_level = (!value.is_empty()).then(|| value.to_string());
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::Message(format!(
        "Unknown configuration key: '{key}'. Available keys: {}",
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TagsetConfig::default();
        assert!(!config.quiet);
        assert_eq!(config.placement, Placement::Down);
        assert_eq!(config.image_extensions, ["jpg", "png", "bmp", "jpeg"]);
        assert_eq!(config.add_position(), AddPosition::Down);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tagset").join("config.toml");

        let config = TagsetConfig::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, TagsetConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = TagsetConfig::default();
        config.set_value("placement", "custom").unwrap();
        config.set_value("custom_position", "2").unwrap();
        config.set_value("image_extensions", ".PNG, webp").unwrap();
        config.save_to(&path).unwrap();

        let loaded = TagsetConfig::load_from(&path).unwrap();
        assert_eq!(loaded.add_position(), AddPosition::Custom(2));
        assert_eq!(loaded.image_extensions, ["png", "webp"]);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let config = TagsetConfig::load_from(&path).unwrap();
        assert!(config.quiet);
        assert_eq!(config.placement, Placement::Down);
        assert_eq!(config.image_extensions.len(), 4);
    }

    #[test]
    fn test_get_and_set_values() {
        let mut config = TagsetConfig::default();
        config.set_value("quiet", "true").unwrap();
        config.set_value("log_level", "debug").unwrap();
        assert_eq!(config.get_value("quiet").unwrap(), "true");
        assert_eq!(config.get_value("log_level").unwrap(), "debug");
        assert_eq!(config.get_value("placement").unwrap(), "down");

        assert!(config.set_value("quiet", "maybe").is_err());
        assert!(config.set_value("placement", "sideways").is_err());
        assert!(config.set_value("image_extensions", " , ").is_err());
        assert!(config.get_value("nope").is_err());
    }
}
