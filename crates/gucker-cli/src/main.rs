//! Gucker CLI - Command-line interface for Gucker
//!
//! Provides commands for:
//! - Watching a folder and uploading new acquisitions
//! - Exporting stages and datasets to local directory trees
//! - Viewing configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{config::ConfigCommand, export::ExportCommand, watch::WatchCommand};
use gucker_core::config::Config;
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "gucker", version, about = "Folder-watching uploader and exporter for Mikro")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Watch a folder and upload newly appearing files
    Watch(WatchCommand),
    /// Export remote objects to a local directory tree
    #[command(subcommand)]
    Export(ExportCommand),
    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Filter directive for the tracing subscriber
///
/// `-v` flags override the configured level; the `RUST_LOG` environment
/// variable overrides both (handled by the caller).
fn log_filter(verbose: u8, config: &Config) -> String {
    match verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path);

    // Setup tracing
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(cli.verbose, &config)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Watch(cmd) => cmd.execute(&config, format).await,
        Commands::Export(cmd) => cmd.execute(&config, format).await,
        Commands::Config(cmd) => cmd.execute(&config, format),
    }
}
