//! Config persistence and path resolution for `Config`.
//!
//! Covers:
//! - `load` / `save` against the default XDG-style location
//! - `load_from` / `save_to` for explicit paths (YAML with atomic write)

use super::Config;
use crate::error::ConfigError;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when no file exists yet. Unlike `load_from`, a missing file is not an error.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found at {:?}, using built-in defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from an explicit YAML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config: Config = serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        if let Err(e) = config.validate() {
            log::error!("Config validation failed for {:?}: {e}", path);
            return Err(e.into());
        }
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Write to a sibling temp file, then rename over the target.
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        log::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Get the configuration file path (`~/.config/tutor-render/config.yaml`).
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("tutor-render")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("tutor-render")
            } else {
                PathBuf::from(".")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");

        Config::default().save_to(&path).unwrap();
        let changed = Config::new().with_default_language("go");
        changed.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), changed);
    }

    #[test]
    fn test_saved_yaml_has_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        Config::default().save_to(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("renderer:"));
        assert!(text.contains("streaming:"));
        assert!(text.contains("quiz:"));
    }
}
