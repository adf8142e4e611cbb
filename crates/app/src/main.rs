use std::path::PathBuf;

use clap::{Parser, Subcommand};
use portvalue_core::{AppConfig, Value};
use tracing_subscriber::EnvFilter;

mod ports;

use ports::Voice;

fn main() -> portvalue_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Project { config, seeded } => run_project(config.as_ref(), seeded),
        Commands::Classify { config } => run_classify(config.as_ref()),
    }
}

fn run_project(config: Option<&PathBuf>, seeded: bool) -> portvalue_core::Result<()> {
    let config = load_config(config)?;
    tracing::info!(block = config.block.size, seeded, "projecting demo voice");

    let voice = Voice::demo(config.block.size);
    let seed = if seeded {
        config.seed.clone()
    } else {
        Value::Impulse
    };
    print_json(&voice.project(&seed), &config)
}

fn run_classify(config: Option<&PathBuf>) -> portvalue_core::Result<()> {
    let config = load_config(config)?;
    tracing::info!("classifying demo ports");
    print_json(&Voice::classify(), &config)
}

fn load_config(path: Option<&PathBuf>) -> portvalue_core::Result<AppConfig> {
    match path {
        Some(path) => {
            tracing::debug!(?path, "loading configuration");
            AppConfig::load(path)
        }
        None => Ok(AppConfig::default()),
    }
}

fn print_json(json: &serde_json::Value, config: &AppConfig) -> portvalue_core::Result<()> {
    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(json)?
    } else {
        serde_json::to_string(json)?
    };
    println!("{rendered}");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect how port values project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Project every port of the demo voice and print the values as JSON.
    Project {
        /// Optional JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Pre-seed destinations with the configured seed instead of an impulse.
        #[arg(long)]
        seeded: bool,
    },
    /// Print the compile-time classification of every demo port.
    Classify {
        /// Optional JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
