//! Watch session entities
//!
//! A `WatchTarget` describes one polling session over a local directory;
//! the `UploadTracker` remembers which file names that session already
//! uploaded. Both live exactly as long as one poll-loop invocation and
//! are owned by it, so no locking is needed.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::newtypes::RemoteId;

/// How a watch session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollMode {
    /// Keep rescanning (with a sleep in between) until cancelled
    Indefinite,
    /// Terminate after the first cycle that discovers no new file
    OneShot,
}

/// Parameters for one watch/upload session
///
/// Created from the user's folder selection; consumed by a single
/// poll-loop invocation.
#[derive(Debug, Clone)]
pub struct WatchTarget {
    /// Directory to scan
    pub directory: PathBuf,
    /// Optional file-name pattern (regex, anchored at the start of the
    /// name but not required to consume it entirely)
    pub pattern: Option<String>,
    /// Whether to poll indefinitely or stop after one empty scan
    pub mode: PollMode,
    /// Dataset the uploads should be attached to, if any
    pub dataset: Option<RemoteId>,
    /// Remove the source file after a *successful* upload instead of
    /// tracking its name for the rest of the session
    pub delete_after_upload: bool,
    /// How long to sleep between scan cycles in indefinite mode
    pub poll_interval: Duration,
}

impl WatchTarget {
    /// Creates a target with the default 1 second poll interval,
    /// keep-and-track upload mode, and no pattern
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            pattern: None,
            mode: PollMode::Indefinite,
            dataset: None,
            delete_after_upload: false,
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Record emitted for each successful upload
///
/// One value per upload network call, in scan order; the lazy sequence
/// the poll loop feeds to its caller consists of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Id assigned by the remote service
    pub id: RemoteId,
    /// Remote name of the created file record
    pub name: String,
    /// Local path that was uploaded
    pub path: PathBuf,
}

/// In-memory set of file names already uploaded in the current session
///
/// Invariant: a file name is uploaded at most once per session. The
/// tracker is dropped with the session; nothing persists across process
/// restarts.
#[derive(Debug, Default)]
pub struct UploadTracker {
    names: HashSet<String>,
}

impl UploadTracker {
    /// Creates an empty tracker
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `name` was already uploaded this session
    #[must_use]
    pub fn seen(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Records `name` as uploaded
    pub fn mark(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    /// Number of files uploaded this session
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing has been uploaded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Borrow the tracked names, e.g. as a scanner exclusion set
    #[must_use]
    pub fn names(&self) -> &HashSet<String> {
        &self.names
    }

    /// Consume the tracker, yielding the uploaded names
    #[must_use]
    pub fn into_names(self) -> HashSet<String> {
        self.names
    }
}
