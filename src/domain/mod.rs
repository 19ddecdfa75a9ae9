//! Domain layer - Entry model, tags, prompts and insights

pub mod entry;
pub mod insights;
pub mod prompt;
pub mod tags;

pub use entry::{EntryUpdate, ImportRecord, WonderEntry};
pub use insights::{WeekStart, WeeklySummary};
pub use prompt::{DailyPrompt, PROMPTS};
pub use tags::extract_tags;
