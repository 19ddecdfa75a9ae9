//! Config management use case

use crate::domain::WeekStart;
use crate::error::{Result, WonderError};
use crate::infrastructure::{Config, JournalRoot};
use std::str::FromStr;

/// Service for managing journal configuration
pub struct ConfigService {
    journal: JournalRoot,
}

impl ConfigService {
    pub fn new(journal: JournalRoot) -> Self {
        ConfigService { journal }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.journal.load_config()?;

        match key {
            "week_start" => Ok(config.week_start.to_string()),
            "confirm_clear" => Ok(config.confirm_clear.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(WonderError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: week_start, confirm_clear, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.journal.load_config()?;

        match key {
            "week_start" => {
                config.week_start = WeekStart::from_str(value).map_err(WonderError::Config)?;
            }
            "confirm_clear" => {
                config.confirm_clear = parse_bool(value)?;
            }
            "created" => {
                return Err(WonderError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(WonderError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: week_start, confirm_clear",
                    key
                )));
            }
        }

        self.journal.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.journal.load_config()
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(WonderError::Config(format!(
            "Invalid boolean: '{}'. Use true or false",
            value
        ))),
    }
}
