//! Infrastructure layer - Storage, configuration and time

pub mod clock;
pub mod config;
pub mod repository;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use repository::{EntryRepository, JournalRoot, KeyValueRepository};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
