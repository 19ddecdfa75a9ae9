//! Application layer - Use cases and orchestration

pub mod capture;
pub mod init;
pub mod list_entries;
pub mod manage_config;
pub mod store;

pub use capture::image_data_uri;
pub use list_entries::{day_view, list_entries, month_view, DayView, ListFilter, MonthView};
pub use manage_config::ConfigService;
pub use store::{Confirm, EntryStore, Notifier, StoreEvent};
