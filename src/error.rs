//! Error types for wonderlens

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the wonderlens application
#[derive(Debug, Error)]
pub enum WonderError {
    #[error("Not a wonder journal: {0}")]
    NotWonderDirectory(PathBuf),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Invalid import data: {0}")]
    InvalidImport(String),

    #[error("Stored entries are corrupt: {0}")]
    CorruptState(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl WonderError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            WonderError::NotWonderDirectory(_) => 2,
            WonderError::EntryNotFound(_) => 3,
            WonderError::InvalidImport(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            WonderError::NotWonderDirectory(path) => {
                format!(
                    "Not a wonder journal: {}\n\n\
                    Suggestions:\n\
                    • Run 'wonder init' in this directory to create a new journal\n\
                    • Navigate to an existing journal directory\n\
                    • Set WONDER_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            WonderError::EntryNotFound(id) => {
                format!(
                    "No entry with id '{}'\n\n\
                    Suggestions:\n\
                    • Use 'wonder list' to see entry ids\n\
                    • Ids are case-sensitive; copy them exactly",
                    id
                )
            }
            WonderError::InvalidImport(msg) => {
                format!(
                    "Failed to import entries: {}\n\n\
                    Import data must be a JSON array of entries, e.g. the output of:\n\
                    wonder export --output backup.json",
                    msg
                )
            }
            WonderError::Config(msg) => {
                if msg.contains("week start") {
                    format!(
                        "{}\n\n\
                        Valid values: sunday, monday\n\
                        Example: wonder config week_start monday",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using WonderError
pub type Result<T> = std::result::Result<T, WonderError>;
