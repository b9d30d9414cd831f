use anyhow::Context;
use clap::Parser;
use quotebox_cache::KvStore;
use quotebox_core::{
    providers::PostsProvider, scheduler::start_periodic_sync, store::pick_random, CategoryFilter,
    Config, KeyValueStore, MemoryStore, PushOutcome, QuoteApp, QuoteStore, SeedOutcome,
    SeedSettings, SyncService, DEFAULT_EXPORT_FILE,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const NO_QUOTES_MESSAGE: &str = "No quotes available.";

#[derive(Parser)]
#[command(name = "quotebox")]
#[command(version, about = "Random quote generator with category filters and server sync", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, env = "QUOTEBOX_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database holding the quotes
    #[arg(long, global = true, env = "QUOTEBOX_DB")]
    db: Option<PathBuf>,

    /// Never talk to the remote
    #[arg(long, global = true)]
    offline: bool,

    /// Keep everything in memory for this run
    #[arg(long, global = true)]
    ephemeral: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show a random quote from the selected category
    Show {
        /// Draw from this category just once, without changing the saved filter
        #[arg(long)]
        category: Option<String>,
    },
    /// Add a quote
    Add {
        /// Quote text
        text: String,
        /// Category label (case-sensitive)
        category: String,
    },
    /// List categories, marking the selected one
    Categories,
    /// Select a category ("all" clears the filter) and show a quote from it
    Filter {
        category: String,
    },
    /// Append quotes from a JSON file
    Import {
        file: PathBuf,
    },
    /// Write every quote to a JSON file
    Export {
        #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
    },
    /// Pull the seed batch from the server
    Fetch,
    /// Push every quote to the server now
    Sync,
    /// Seed from the server, then push on a timer until Ctrl-C
    Watch {
        /// Seconds between pushes (overrides config)
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quotebox_cli=info,quotebox_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;

    let app = build_app(&cli, &config)?;

    match cli.command {
        Some(Commands::Show { category: Some(category) }) => {
            let store = app.store().await;
            let view = store.filtered_view(&CategoryFilter::from_label(&category));
            print_quote(pick_random(&view).map(|q| q.text.as_str()));
        }
        Some(Commands::Show { category: None }) | None => {
            let quote = app.random_quote().await;
            print_quote(quote.as_ref().map(|q| q.text.as_str()));
        }
        Some(Commands::Add { text, category }) => {
            let change = app.add_quote(&text, &category).await?;
            println!("Quote added successfully!");
            tracing::debug!("Added to '{}'", change.value.category);
            report_push(change.push);
        }
        Some(Commands::Categories) => {
            let store = app.store().await;
            let selected = store.selected_category().label().to_string();
            for option in store.category_options() {
                let marker = if option == selected { "*" } else { " " };
                println!("{} {}", marker, option);
            }
        }
        Some(Commands::Filter { category }) => {
            let quote = app
                .filter_and_pick(CategoryFilter::from_label(&category))
                .await?;
            print_quote(quote.as_ref().map(|q| q.text.as_str()));
        }
        Some(Commands::Import { file }) => {
            let change = app
                .import_file(&file)
                .await
                .with_context(|| format!("Failed to import {}", file.display()))?;
            println!("Quotes imported successfully! ({} added)", change.value);
            report_push(change.push);
        }
        Some(Commands::Export { output }) => {
            let count = app.export_file(&output).await?;
            println!("Exported {} quotes to {}", count, output.display());
        }
        Some(Commands::Fetch) => report_seed(app.load_seed().await?),
        Some(Commands::Sync) => match app.sync_now().await {
            Some(outcome) => report_push(Some(outcome)),
            None => println!("Sync is disabled."),
        },
        Some(Commands::Watch { interval }) => {
            let interval_secs = interval.unwrap_or(config.sync.interval_secs);
            run_watch(app, config.sync.fetch_on_start, interval_secs).await?;
        }
    }

    Ok(())
}

fn build_app(cli: &Cli, config: &Config) -> anyhow::Result<QuoteApp> {
    let backend: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        let db_path = match &cli.db {
            Some(path) => path.clone(),
            None => config.db_path()?,
        };
        tracing::debug!("Using database at {}", db_path.display());
        Box::new(
            KvStore::open(&db_path)
                .with_context(|| format!("Failed to open {}", db_path.display()))?,
        )
    };

    let store = QuoteStore::load(backend, config.storage.seed_defaults)
        .context("Failed to load saved quotes")?;

    let sync = if cli.offline || !config.sync.enabled {
        None
    } else {
        let provider = PostsProvider::new(&config.remote.base_url)?;
        tracing::debug!("Syncing against {}", provider.endpoint());
        Some(SyncService::with_seed_settings(
            Arc::new(provider),
            SeedSettings {
                limit: config.remote.seed_limit,
                category: config.remote.seed_category.clone(),
            },
        ))
    };

    Ok(QuoteApp::new(store, sync).with_push_on_change(config.sync.push_on_change))
}

async fn run_watch(app: QuoteApp, fetch_on_start: bool, interval_secs: u64) -> anyhow::Result<()> {
    if !app.sync_enabled() {
        anyhow::bail!("Watch needs the remote; drop --offline or enable sync in the config");
    }

    if fetch_on_start {
        report_seed(app.load_seed().await?);
    }

    let app = Arc::new(app);
    print_quote(app.random_quote().await.as_ref().map(|q| q.text.as_str()));

    let handle = start_periodic_sync(app, Duration::from_secs(interval_secs));
    tokio::signal::ctrl_c().await?;
    handle.abort();
    tracing::info!("Stopped");
    Ok(())
}

fn print_quote(text: Option<&str>) {
    println!("{}", text.unwrap_or(NO_QUOTES_MESSAGE));
}

fn report_seed(outcome: SeedOutcome) {
    match outcome {
        SeedOutcome::Merged { added } => {
            println!("Quotes fetched from server successfully! ({} added)", added)
        }
        SeedOutcome::Failed { error } => eprintln!("Could not fetch quotes from server: {}", error),
        SeedOutcome::Disabled => println!("Sync is disabled."),
    }
}

fn report_push(outcome: Option<PushOutcome>) {
    match outcome {
        Some(PushOutcome::Completed { .. }) => println!("Quotes synced with server!"),
        Some(PushOutcome::Aborted { pushed, error }) => {
            eprintln!("Sync stopped after {} quotes: {}", pushed, error)
        }
        Some(PushOutcome::Skipped) => println!("A sync is already running."),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_defaults_to_quotes_json() {
        let cli = Cli::parse_from(["quotebox", "export"]);
        match cli.command {
            Some(Commands::Export { output }) => assert_eq!(output, PathBuf::from("quotes.json")),
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["quotebox", "add", "Stay hungry.", "Motivation", "--offline"]);
        assert!(cli.offline);
        assert!(matches!(cli.command, Some(Commands::Add { .. })));
    }
}
