//! Configuration management

use crate::domain::WeekStart;
use crate::error::{Result, WonderError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_confirm_clear() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// First day of the week for weekly insights
    #[serde(default)]
    pub week_start: WeekStart,

    /// Ask before clearing all entries
    #[serde(default = "default_confirm_clear")]
    pub confirm_clear: bool,

    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new(week_start: WeekStart) -> Self {
        Config {
            week_start,
            confirm_clear: true,
            created: Utc::now(),
        }
    }

    /// Load config from .wonder/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".wonder").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WonderError::NotWonderDirectory(path.to_path_buf())
            } else {
                WonderError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| WonderError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .wonder/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let wonder_dir = path.join(".wonder");
        let config_path = wonder_dir.join("config.toml");

        if !wonder_dir.exists() {
            fs::create_dir(&wonder_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| WonderError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }
}
