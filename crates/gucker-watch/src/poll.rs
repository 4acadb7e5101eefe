//! Poll loop - the watch session state machine
//!
//! Repeatedly scans the watch directory, uploads each newly discovered
//! file exactly once, and either sleeps and rescans (indefinite mode)
//! or terminates after the first empty scan (one-shot mode).
//!
//! ## States
//!
//! ```text
//! IDLE ──→ SCANNING ──→ (UPLOADING)* ──→ SLEEPING ──┐
//!             ▲                             │       │
//!             └─────────────────────────────┘   TERMINATED
//! ```
//!
//! Uploads are strictly sequential: at most one network call is in
//! flight, in scan order within a cycle. Cancellation is cooperative
//! and observed only at the sleep boundary; an in-flight upload always
//! runs to completion.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use gucker_core::domain::errors::WatchError;
use gucker_core::domain::watch::{PollMode, UploadTracker, UploadedFile, WatchTarget};
use gucker_core::ports::data_service::DataService;
use gucker_core::ports::notification::WatchObserver;

use crate::scanner::{scan, WatchPattern};

/// Files at or above this size go through the streamed big-file upload
const DEFAULT_BIG_FILE_THRESHOLD: u64 = 64 * 1024 * 1024;

/// Summary of a completed watch session
#[derive(Debug, Clone)]
pub struct WatchSummary {
    /// Number of files uploaded this session
    pub files_uploaded: u32,
    /// Number of scan cycles performed
    pub cycles: u32,
    /// Wall-clock duration of the session in milliseconds
    pub duration_ms: u64,
}

/// Outcome of processing the files of one scan cycle
enum CycleOutcome {
    /// All discovered files were uploaded
    Continue,
    /// The result sink was dropped; the caller abandoned the sequence
    SinkClosed,
}

/// The watch session state machine
///
/// One `run` call is one session: its own [`UploadTracker`], its own
/// lazy result sequence, no state shared with other invocations. The
/// host guarantees at most one active session per watch target.
pub struct PollLoop {
    /// Remote upload operations
    service: Arc<dyn DataService>,
    /// Byte threshold for switching to the streamed upload variant
    big_file_threshold: u64,
}

impl PollLoop {
    /// Creates a poll loop over the given data service
    pub fn new(service: Arc<dyn DataService>) -> Self {
        Self {
            service,
            big_file_threshold: DEFAULT_BIG_FILE_THRESHOLD,
        }
    }

    /// Overrides the big-file threshold (in bytes)
    #[must_use]
    pub fn with_big_file_threshold(mut self, bytes: u64) -> Self {
        self.big_file_threshold = bytes;
        self
    }

    /// Runs one watch session to completion
    ///
    /// Each successful upload is emitted through `sink` in scan order.
    /// In indefinite mode the loop only returns on cancellation
    /// ([`WatchError::Cancelled`]), an upload failure, or when the sink
    /// is dropped; in one-shot mode it also returns after the first
    /// cycle that discovers no new matching file.
    ///
    /// # Errors
    /// - [`WatchError::NoDirectory`] when the target has no directory
    /// - [`WatchError::InvalidPattern`] for an uncompilable pattern
    /// - [`WatchError::Upload`] when a remote upload call fails; the
    ///   file is not marked uploaded and a rerun will retry it
    /// - [`WatchError::Cancelled`] when cancellation is signalled while
    ///   sleeping
    #[tracing::instrument(skip(self, target, observer, sink, cancel), fields(directory = %target.directory.display()))]
    pub async fn run(
        &self,
        target: &WatchTarget,
        observer: &dyn WatchObserver,
        sink: mpsc::Sender<UploadedFile>,
        cancel: CancellationToken,
    ) -> Result<WatchSummary, WatchError> {
        if target.directory.as_os_str().is_empty() {
            return Err(WatchError::NoDirectory);
        }

        let pattern = target
            .pattern
            .as_deref()
            .map(WatchPattern::new)
            .transpose()?;

        let start = Instant::now();
        let mut tracker = UploadTracker::new();
        let mut cycles: u32 = 0;

        info!(
            mode = ?target.mode,
            interval_ms = target.poll_interval.as_millis() as u64,
            "Watch session starting"
        );
        observer.watching_started(&target.directory);

        let result = loop {
            cycles += 1;

            let names = match scan(&target.directory, pattern.as_ref(), tracker.names()) {
                Ok(names) => names,
                Err(err) => break Err(err),
            };

            if names.is_empty() {
                debug!(cycle = cycles, "No new files");
                if target.mode == PollMode::OneShot {
                    break Ok(());
                }
            } else {
                debug!(cycle = cycles, count = names.len(), "New files discovered");
                match self
                    .process_cycle(target, &names, observer, &sink, &mut tracker)
                    .await
                {
                    Ok(CycleOutcome::Continue) => {}
                    Ok(CycleOutcome::SinkClosed) => {
                        info!("Result sink dropped, ending watch session");
                        break Ok(());
                    }
                    Err(err) => break Err(err),
                }
                if target.mode == PollMode::OneShot {
                    // Rescan immediately; termination happens on the
                    // first cycle that finds nothing new.
                    continue;
                }
            }

            // The only suspension point where cancellation is observed.
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Cancellation signalled while sleeping");
                    break Err(WatchError::Cancelled);
                }
                _ = tokio::time::sleep(target.poll_interval) => {}
            }
        };

        observer.watching_stopped(&target.directory);

        let summary = WatchSummary {
            files_uploaded: tracker.len() as u32,
            cycles,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        match result {
            Ok(()) => {
                info!(
                    uploaded = summary.files_uploaded,
                    cycles = summary.cycles,
                    "Watch session finished"
                );
                Ok(summary)
            }
            Err(err) => Err(err),
        }
    }

    /// Uploads every file of one scan cycle, strictly in order
    async fn process_cycle(
        &self,
        target: &WatchTarget,
        names: &[String],
        observer: &dyn WatchObserver,
        sink: &mpsc::Sender<UploadedFile>,
        tracker: &mut UploadTracker,
    ) -> Result<CycleOutcome, WatchError> {
        for name in names {
            let path = target.directory.join(name);
            observer.upload_started(&path);

            let size = tokio::fs::metadata(&path).await.map(|m| m.len())?;

            let uploaded = if size >= self.big_file_threshold {
                debug!(name, size, "Uploading (streamed)");
                self.service
                    .upload_big_file(&path, target.dataset.as_ref())
                    .await
            } else {
                debug!(name, size, "Uploading");
                self.service.upload(&path, target.dataset.as_ref()).await
            };

            let uploaded = match uploaded {
                Ok(record) => record,
                Err(source) => {
                    warn!(name, "Upload failed, file will be retried by a rerun");
                    return Err(WatchError::Upload {
                        name: name.clone(),
                        source,
                    });
                }
            };

            observer.upload_finished(&path);

            if target.delete_after_upload {
                // Only after a confirmed successful upload; a failed
                // upload must keep the source file for retry.
                tokio::fs::remove_file(&path).await?;
                debug!(name, "Source file removed after upload");
            }
            // Tracked either way so a kept file is not re-uploaded and
            // the summary counts deleted ones too.
            tracker.mark(name.clone());

            if sink.send(uploaded).await.is_err() {
                return Ok(CycleOutcome::SinkClosed);
            }
        }

        Ok(CycleOutcome::Continue)
    }
}
