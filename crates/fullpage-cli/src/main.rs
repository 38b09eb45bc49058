use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fullpage_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "fullpage")]
#[command(author, version, about = "Full-page section scrolling in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: ~/.config/fullpage/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive viewer
    Run {
        /// Deck file with the five sections
        #[arg(short, long)]
        deck: Option<PathBuf>,
        /// Address fragment to open at, e.g. "#3"
        #[arg(short, long)]
        fragment: Option<String>,
    },
    /// Print section placements
    Layout {
        /// Only the layout while this section is current
        #[arg(short, long)]
        section: Option<usize>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Replay a timed input trace and print each outcome
    Simulate {
        /// Trace file (JSON)
        trace: PathBuf,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::load()?,
    };
    let config = Arc::new(config);

    // The viewer owns the terminal, so its logs go to a file
    let interactive = matches!(cli.command, Some(Commands::Run { .. }) | None);
    init_logging(&config, interactive)?;

    match cli.command {
        Some(Commands::Run { deck, fragment }) => commands::run::run(config, deck, fragment).await,
        None => commands::run::run(config, None, None).await,
        Some(Commands::Layout { section, json }) => commands::layout::run(&config, section, json),
        Some(Commands::Simulate { trace, json }) => commands::simulate::run(&config, &trace, json),
        Some(Commands::Config { action }) => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(cli.config.as_deref()),
            ConfigAction::Init => commands::config::init(),
        },
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let dir = config.log_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("fullpage.log"))?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
