//! Watch command - Watch a folder and upload new acquisitions
//!
//! Provides the `gucker watch` CLI command which:
//! 1. Resolves the watch directory and pattern from flags or config
//! 2. Creates the Mikro client and the poll loop
//! 3. Streams upload results to the terminal until Ctrl-C

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use gucker_core::config::Config;
use gucker_core::domain::errors::WatchError;
use gucker_core::domain::newtypes::RemoteId;
use gucker_core::domain::watch::{PollMode, UploadedFile, WatchTarget};
use gucker_core::ports::notification::WatchObserver;
use gucker_mikro::client::MikroClient;
use gucker_watch::poll::PollLoop;

use crate::output::{Output, OutputFormat};

/// Watch command with clap options
#[derive(Debug, Args)]
pub struct WatchCommand {
    /// Directory to watch (defaults to watch.base_dir from config)
    pub directory: Option<PathBuf>,

    /// File-name pattern, matched from the start of the name
    #[arg(long)]
    pub pattern: Option<String>,

    /// Stop after the first scan that finds no new files
    #[arg(long)]
    pub once: bool,

    /// Attach uploads to this dataset id
    #[arg(long)]
    pub dataset: Option<String>,

    /// Seconds between scans (defaults to watch.poll_interval)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Delete each source file after its upload succeeded
    #[arg(long)]
    pub delete: bool,
}

/// Prints lifecycle events for the interactive session
struct CliObserver {
    format: OutputFormat,
}

impl WatchObserver for CliObserver {
    fn watching_started(&self, directory: &std::path::Path) {
        if self.format == OutputFormat::Human {
            println!("\u{2713} Watching {} (Ctrl-C to stop)", directory.display());
        }
    }

    fn upload_started(&self, path: &std::path::Path) {
        if self.format == OutputFormat::Human {
            if let Some(name) = path.file_name() {
                println!("  \u{2191} {}", name.to_string_lossy());
            }
        }
    }
}

impl WatchCommand {
    /// Execute the watch command
    ///
    /// Runs a single watch session and prints each uploaded file as it
    /// is confirmed by the server. Ctrl-C ends the session cleanly.
    pub async fn execute(&self, config: &Config, format: OutputFormat) -> Result<()> {
        let out = Output::new(format);

        let target = match self.build_target(config)? {
            Some(t) => t,
            None => {
                out.error(
                    "No watch directory selected. Pass one or set watch.base_dir in the config.",
                );
                return Ok(());
            }
        };

        info!(
            directory = %target.directory.display(),
            pattern = target.pattern.as_deref().unwrap_or("<none>"),
            "Starting watch session"
        );

        let client = MikroClient::new(&config.server.endpoint, config.server.token.clone())
            .context("Failed to create Mikro client")?;
        let poll = PollLoop::new(Arc::new(client));

        // Print each confirmed upload as the session produces it
        let (tx, mut rx) = mpsc::channel::<UploadedFile>(16);
        let printer = tokio::spawn(async move {
            let mut uploaded: u32 = 0;
            while let Some(file) = rx.recv().await {
                uploaded += 1;
                match format {
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            serde_json::json!({
                                "event": "uploaded",
                                "id": file.id.as_str(),
                                "name": file.name,
                                "path": file.path.display().to_string(),
                            })
                        );
                    }
                    OutputFormat::Human => {
                        println!("  \u{2713} {} (id {})", file.name, file.id.as_str());
                    }
                }
            }
            uploaded
        });

        let cancel = CancellationToken::new();
        {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            });
        }

        let observer = CliObserver { format };
        let result = poll.run(&target, &observer, tx, cancel).await;
        let uploaded = printer.await.unwrap_or(0);

        match result {
            Ok(summary) => {
                if out.is_json() {
                    out.print_json(&serde_json::json!({
                        "files_uploaded": summary.files_uploaded,
                        "cycles": summary.cycles,
                        "duration_ms": summary.duration_ms,
                    }));
                } else {
                    let duration = if summary.duration_ms >= 1000 {
                        format!("{:.1}s", summary.duration_ms as f64 / 1000.0)
                    } else {
                        format!("{}ms", summary.duration_ms)
                    };
                    if summary.files_uploaded == 0 {
                        out.success(&format!("Nothing new after {}", duration));
                    } else {
                        out.success(&format!(
                            "Uploaded {} file{} in {}",
                            summary.files_uploaded,
                            if summary.files_uploaded == 1 { "" } else { "s" },
                            duration
                        ));
                    }
                }
                Ok(())
            }
            Err(WatchError::Cancelled) => {
                if out.is_json() {
                    out.print_json(&serde_json::json!({
                        "cancelled": true,
                        "files_uploaded": uploaded,
                    }));
                } else {
                    out.success(&format!(
                        "Watch stopped ({} file{} uploaded)",
                        uploaded,
                        if uploaded == 1 { "" } else { "s" }
                    ));
                }
                Ok(())
            }
            Err(err @ (WatchError::NoDirectory | WatchError::InvalidPattern(_))) => {
                out.error(&err.to_string());
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Resolve command flags against the configuration
    ///
    /// Returns `Ok(None)` when no directory is selected anywhere.
    fn build_target(&self, config: &Config) -> Result<Option<WatchTarget>> {
        let directory = match self
            .directory
            .clone()
            .or_else(|| config.watch.base_dir.clone())
        {
            Some(d) => d,
            None => return Ok(None),
        };

        let mut target = WatchTarget::new(directory);
        target.pattern = self
            .pattern
            .clone()
            .or_else(|| config.watch.pattern.clone());
        if self.once {
            target.mode = PollMode::OneShot;
        }
        target.dataset = self
            .dataset
            .as_deref()
            .map(RemoteId::new)
            .transpose()
            .context("Invalid dataset id")?;
        target.poll_interval =
            Duration::from_secs(self.interval.unwrap_or(config.watch.poll_interval));
        target.delete_after_upload = self.delete;

        Ok(Some(target))
    }
}
