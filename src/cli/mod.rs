//! CLI layer - Command-line interface

pub mod commands;
pub mod confirm;
pub mod output;

pub use commands::{Cli, Commands};
pub use confirm::TerminalConfirm;
pub use output::{format_entry_detail, format_entry_list, format_tag_counts};
