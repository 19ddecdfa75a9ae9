use clap::Parser;
use std::fs;
use std::io::Read;
use std::str::FromStr;
use wonderlens::application::init::init;
use wonderlens::application::{
    day_view, image_data_uri, list_entries, month_view, ConfigService, Confirm, EntryStore,
    ListFilter, StoreEvent,
};
use wonderlens::cli::output::{format_day_view, format_month_calendar, format_weekly_summary};
use wonderlens::cli::{format_entry_detail, format_entry_list, format_tag_counts};
use wonderlens::cli::{Cli, Commands, TerminalConfirm};
use wonderlens::domain::insights::tag_counts;
use wonderlens::domain::{EntryUpdate, WeekStart, WeeklySummary, WonderEntry};
use wonderlens::error::{Result, WonderError};
use wonderlens::infrastructure::{Clock, Config, FileStorage, JournalRoot, KeyValueRepository};

type CliStore = EntryStore<KeyValueRepository<FileStorage>>;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!("wonderlens={}", log_level))
            }),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Open the journal's store with a notifier that prints events
fn open_store() -> Result<(Config, CliStore)> {
    let journal = JournalRoot::discover()?;
    let config = journal.load_config()?;
    let mut store = EntryStore::open(journal.repository());
    store.subscribe(Box::new(|event: &StoreEvent| match event {
        // Reported through the command's error instead
        StoreEvent::ImportFailed(_) => {}
        other if other.is_failure() => eprintln!("Warning: {}", other.message()),
        other => println!("{}", other.message()),
    }));
    Ok((config, store))
}

fn require_entry<'a>(store: &'a CliStore, id: &str) -> Result<&'a WonderEntry> {
    store
        .entry_by_id(id)
        .ok_or_else(|| WonderError::EntryNotFound(id.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        println!("wonder - Photo journal of everyday wonder");
        println!("Use --help for usage information");
        return Ok(());
    };

    match command {
        Commands::Init { path, week_start } => {
            let week_start = WeekStart::from_str(&week_start).map_err(WonderError::Config)?;
            init(&path, week_start)?;
            println!("Initialized wonder journal at {}", path.display());
            Ok(())
        }
        Commands::Prompt { random } => {
            let (_, mut store) = open_store()?;
            if random {
                println!("{}", store.random_prompt());
            } else {
                println!("{}", store.daily_prompt());
            }
            Ok(())
        }
        Commands::Add {
            image,
            reflection,
            prompt,
        } => {
            let image = image_data_uri(&image)?;
            let (_, mut store) = open_store()?;
            let prompt = match prompt {
                Some(p) => p,
                None => store.daily_prompt().to_string(),
            };
            let id = store.add_entry(image, reflection, prompt);
            println!("{}", id);
            Ok(())
        }
        Commands::List {
            tag,
            month,
            year,
            limit,
        } => {
            let (_, store) = open_store()?;
            let filter = ListFilter {
                tag,
                month,
                year,
                limit,
            };
            let entries = list_entries(&store, &filter);
            println!("{}", format_entry_list(&entries).trim_end());
            Ok(())
        }
        Commands::Show { id } => {
            let (_, store) = open_store()?;
            print!("{}", format_entry_detail(require_entry(&store, &id)?));
            Ok(())
        }
        Commands::Edit {
            id,
            reflection,
            prompt,
        } => {
            let update = EntryUpdate { reflection, prompt };
            if update.is_empty() {
                return Err(WonderError::Config(
                    "Nothing to edit: pass --reflection and/or --prompt".to_string(),
                ));
            }
            let (_, mut store) = open_store()?;
            require_entry(&store, &id)?;
            store.update_entry(&id, update);
            Ok(())
        }
        Commands::Delete { id } => {
            let (_, mut store) = open_store()?;
            require_entry(&store, &id)?;
            store.delete_entry(&id);
            Ok(())
        }
        Commands::Export { output } => {
            let (_, store) = open_store()?;
            let json = store.export_entries_to_json()?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("Exported {} entries to {}", store.len(), path.display());
                }
                None => println!("{}", json),
            }
            Ok(())
        }
        Commands::Import { file } => {
            let text = if file.as_os_str() == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                fs::read_to_string(&file)?
            };
            let (_, mut store) = open_store()?;
            store.import_entries(&text).map_err(|e| match e {
                WonderError::Json(json) => {
                    WonderError::InvalidImport(format!("Invalid JSON format ({})", json))
                }
                other => other,
            })?;
            Ok(())
        }
        Commands::Clear { yes } => {
            let (config, mut store) = open_store()?;
            let skip_question = yes || !config.confirm_clear;
            let confirm: &dyn Confirm = if skip_question { &true } else { &TerminalConfirm };
            if !store.clear_all_entries(confirm) {
                println!("Cancelled; no entries were deleted");
            }
            Ok(())
        }
        Commands::Tags => {
            let (_, store) = open_store()?;
            println!("{}", format_tag_counts(&tag_counts(store.entries())).trim_end());
            Ok(())
        }
        Commands::Insights => {
            let (config, store) = open_store()?;
            let today = store.clock().today();
            let summary = WeeklySummary::build(store.entries(), today, config.week_start);
            print!("{}", format_weekly_summary(&summary));
            Ok(())
        }
        Commands::Calendar { month, year, date } => {
            let (config, store) = open_store()?;

            if let Some(date) = date {
                let view = day_view(&store, &date)?;
                println!("{}", format_day_view(&view).trim_end());
                return Ok(());
            }

            let view = month_view(&store, month, year);
            print!(
                "{}",
                format_month_calendar(view.month0, view.year, &view.heatmap, config.week_start)
            );
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let journal = JournalRoot::discover()?;
            let service = ConfigService::new(journal);

            if list {
                let config = service.list()?;
                println!("week_start = {}", config.week_start);
                println!("confirm_clear = {}", config.confirm_clear);
                println!("created = {}", config.created.to_rfc3339());
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: wonder config [--list | <key> [<value>]]");
                println!("Valid keys: week_start, confirm_clear, created");
            }
            Ok(())
        }
    }
}
