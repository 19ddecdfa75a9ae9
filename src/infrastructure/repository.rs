//! Entry persistence and journal discovery

use crate::domain::prompt::{format_prompt_date, parse_prompt_date};
use crate::domain::{DailyPrompt, WonderEntry};
use crate::error::{Result, WonderError};
use crate::infrastructure::storage::{FileStorage, KeyValueStorage};
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage key holding the JSON array of entries
pub const ENTRIES_KEY: &str = "wonderEntries";
/// Storage key holding the current daily prompt text
pub const PROMPT_KEY: &str = "dailyPrompt";
/// Storage key holding the date the daily prompt was chosen
pub const PROMPT_DATE_KEY: &str = "dailyPromptDate";

const WONDER_DIR: &str = ".wonder";
const STORAGE_DIR: &str = "storage";

/// Abstract persistence for the entry store
pub trait EntryRepository {
    /// Load the persisted entries, empty if none were ever saved
    fn load_entries(&self) -> Result<Vec<WonderEntry>>;

    /// Replace the persisted entries with `entries`
    fn save_entries(&mut self, entries: &[WonderEntry]) -> Result<()>;

    /// Load the persisted daily prompt, if both text and date are present
    fn load_daily_prompt(&self) -> Result<Option<DailyPrompt>>;

    fn save_daily_prompt(&mut self, prompt: &DailyPrompt) -> Result<()>;
}

/// Entry repository over any key-value storage
#[derive(Debug, Clone)]
pub struct KeyValueRepository<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> KeyValueRepository<S> {
    pub fn new(storage: S) -> Self {
        KeyValueRepository { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

impl<S: KeyValueStorage> EntryRepository for KeyValueRepository<S> {
    fn load_entries(&self) -> Result<Vec<WonderEntry>> {
        let Some(raw) = self.storage.get(ENTRIES_KEY)? else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<WonderEntry> =
            serde_json::from_str(&raw).map_err(|e| WonderError::CorruptState(e.to_string()))?;

        // Stored tags are never trusted over the reflection they came from
        for entry in &mut entries {
            entry.refresh_tags();
        }

        Ok(entries)
    }

    fn save_entries(&mut self, entries: &[WonderEntry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.storage.set(ENTRIES_KEY, &json)
    }

    fn load_daily_prompt(&self) -> Result<Option<DailyPrompt>> {
        let text = self.storage.get(PROMPT_KEY)?;
        let date = self.storage.get(PROMPT_DATE_KEY)?;

        Ok(match (text, date) {
            (Some(text), Some(date)) if !text.is_empty() => {
                parse_prompt_date(&date).map(|date| DailyPrompt::new(text, date))
            }
            _ => None,
        })
    }

    fn save_daily_prompt(&mut self, prompt: &DailyPrompt) -> Result<()> {
        self.storage.set(PROMPT_KEY, &prompt.text)?;
        self.storage
            .set(PROMPT_DATE_KEY, &format_prompt_date(prompt.date))
    }
}

/// A journal directory on disk: `<root>/.wonder/{config.toml,storage/}`
#[derive(Debug, Clone)]
pub struct JournalRoot {
    pub root: PathBuf,
}

impl JournalRoot {
    pub fn new(root: PathBuf) -> Self {
        JournalRoot { root }
    }

    /// Discover the journal root.
    /// First checks the WONDER_ROOT environment variable, then walks up from
    /// the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("WONDER_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_wonder_dir(&path) {
                return Ok(JournalRoot::new(path));
            } else {
                return Err(WonderError::Config(format!(
                    "WONDER_ROOT is set to '{}' but no .wonder directory found. \
                    Run 'wonder init' in that directory or unset WONDER_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the journal root by walking up from `start`
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_wonder_dir(&current) {
                return Ok(JournalRoot::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(WonderError::NotWonderDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_wonder_dir(path: &Path) -> bool {
        path.join(WONDER_DIR).is_dir()
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_wonder_dir(&self.root)
    }

    /// Create the `.wonder` directory structure
    pub fn initialize(&self) -> Result<()> {
        let wonder_dir = self.root.join(WONDER_DIR);

        if wonder_dir.exists() {
            return Err(WonderError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(wonder_dir.join(STORAGE_DIR))?;
        Ok(())
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.root.join(WONDER_DIR).join(STORAGE_DIR))
    }

    /// Entry repository backed by this journal's storage directory
    pub fn repository(&self) -> KeyValueRepository<FileStorage> {
        KeyValueRepository::new(self.storage())
    }
}
