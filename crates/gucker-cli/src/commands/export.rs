//! Export command - Download remote objects into a local directory tree
//!
//! Provides the `gucker export` CLI commands which:
//! 1. Resolve the destination from flags or config
//! 2. Walk a stage or dataset through the export walker
//! 3. Report count-based progress and the resulting directory

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use gucker_core::config::Config;
use gucker_core::domain::errors::ExportError;
use gucker_core::domain::newtypes::RemoteId;
use gucker_core::ports::notification::ProgressObserver;
use gucker_export::walker::ExportWalker;
use gucker_mikro::client::MikroClient;

use crate::output::{Output, OutputFormat};

/// Export subcommands
#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// Export a stage with its positions and acquisitions
    Stage {
        /// Remote id of the stage
        id: String,
        /// Destination directory (defaults to export.destination from config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export the originally uploaded files of a dataset
    Dataset {
        /// Remote id of the dataset
        id: String,
        /// Destination directory (defaults to export.destination from config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Prints one progress line per exported node
struct CliProgress {
    format: OutputFormat,
}

impl ProgressObserver for CliProgress {
    fn advance(&self, done: usize, total: usize) {
        info!(done, total, "Export progress");
        if self.format == OutputFormat::Human {
            println!("  [{}/{}]", done, total);
        }
    }
}

impl ExportCommand {
    /// Execute the export command
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let out = Output::new(format);

        let client = MikroClient::new(&config.server.endpoint, config.server.token.clone())
            .context("Failed to create Mikro client")?;
        let walker = ExportWalker::new(Arc::new(client));
        let progress = CliProgress { format };

        let (id, out_dir, kind) = match self {
            ExportCommand::Stage { id, out } => (id, out, "stage"),
            ExportCommand::Dataset { id, out } => (id, out, "dataset"),
        };

        let id = match RemoteId::new(id.as_str()) {
            Ok(id) => id,
            Err(e) => {
                out.error(&format!("Invalid {} id: {}", kind, e));
                return Ok(());
            }
        };
        let destination = out_dir
            .clone()
            .or_else(|| config.export.destination.clone());

        info!(id = %id.as_str(), kind, "Starting export");

        let result = match self {
            ExportCommand::Stage { .. } => {
                walker
                    .export_stage(&id, destination.as_deref(), &progress)
                    .await
            }
            ExportCommand::Dataset { .. } => {
                walker
                    .export_dataset(&id, destination.as_deref(), &progress)
                    .await
            }
        };

        match result {
            Ok(path) => {
                if out.is_json() {
                    out.print_json(&serde_json::json!({
                        "success": true,
                        "id": id.as_str(),
                        "path": path.display().to_string(),
                    }));
                } else {
                    out.success(&format!("Exported {} {} to {}", kind, id.as_str(), path.display()));
                }
                Ok(())
            }
            Err(ExportError::NoDestination) => {
                out.error(
                    "No export destination selected. Pass --out or set export.destination in the config.",
                );
                Ok(())
            }
            Err(ExportError::NotFound(id)) => {
                out.error(&format!("No {} with id {} on the server", kind, id.as_str()));
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
