//! Initialize journal use case

use crate::domain::WeekStart;
use crate::error::Result;
use crate::infrastructure::{Config, JournalRoot};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a new journal at the specified path.
pub fn init(path: &Path, week_start: WeekStart) -> Result<JournalRoot> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let journal = JournalRoot::new(path.to_path_buf());
    journal.initialize()?;
    journal.save_config(&Config::new(week_start))?;

    info!(path = %path.display(), "initialized journal");
    Ok(journal)
}
