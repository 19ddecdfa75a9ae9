//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wonder")]
#[command(about = "Photo journal of small moments of wonder", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// First day of the week for insights (sunday, monday)
        #[arg(short, long, default_value = "sunday")]
        week_start: String,
    },

    /// Show today's prompt
    Prompt {
        /// Show a random prompt instead (does not change today's prompt)
        #[arg(short, long)]
        random: bool,
    },

    /// Capture a new moment
    Add {
        /// Image file or data URI
        #[arg(short, long)]
        image: String,

        /// Reflection text; #hashtags become tags
        #[arg(short, long, default_value = "")]
        reflection: String,

        /// Prompt answered (default: today's prompt)
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// List entries, newest first
    List {
        /// Only entries with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only entries from this month (1-12)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Only entries from this year (default with --month: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one entry
    Show {
        id: String,
    },

    /// Edit the reflection or prompt of an entry
    Edit {
        id: String,

        /// New reflection (tags are re-derived)
        #[arg(short, long)]
        reflection: Option<String>,

        /// New prompt text
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// Delete an entry
    Delete {
        id: String,
    },

    /// Export all entries as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import entries from a JSON export ("-" reads stdin)
    Import {
        file: PathBuf,
    },

    /// Delete ALL entries
    Clear {
        /// Skip the confirmation question
        #[arg(short, long)]
        yes: bool,
    },

    /// List tags by how often they are used
    Tags,

    /// Weekly capture counts and top tags
    Insights,

    /// Month view of days with entries
    Calendar {
        /// Month (1-12, default: current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Year (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// List the entries of one day (YYYY-MM-DD) instead
        #[arg(short, long)]
        date: Option<String>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
