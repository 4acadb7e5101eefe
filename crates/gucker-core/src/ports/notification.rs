//! Lifecycle and progress observer ports (driven/secondary ports)
//!
//! The engines report lifecycle events (watching started, a file is
//! uploading, ...) and count-based progress through these traits.
//! Notifications are best-effort UI feedback, not correctness signals:
//! implementations must not fail, and the engines never act on them.
//!
//! ## Threading
//!
//! Callbacks are invoked from the engine's task, which the host may run
//! off the interactive thread, so implementations must be thread-safe.

use std::path::Path;

/// Observer for watch-session lifecycle events
///
/// Fires zero or more times per session, in this order per file:
/// `upload_started`, then `upload_finished` once the network call
/// returned successfully. `watching_started`/`watching_stopped` bracket
/// the whole session.
pub trait WatchObserver: Send + Sync {
    /// Called once when the session begins scanning
    fn watching_started(&self, directory: &Path) {
        let _ = directory;
    }

    /// Called once when the session ends, normally or by cancellation
    fn watching_stopped(&self, directory: &Path) {
        let _ = directory;
    }

    /// Called before the upload network call for a file is issued
    fn upload_started(&self, path: &Path) {
        let _ = path;
    }

    /// Called after the upload network call returned successfully
    fn upload_finished(&self, path: &Path) {
        let _ = path;
    }
}

/// Count-based progress indicator for exports
///
/// `advance` is called once per processed node with the number done so
/// far and the total, side effect only.
pub trait ProgressObserver: Send + Sync {
    /// Report that `done` of `total` nodes have been processed
    fn advance(&self, done: usize, total: usize);
}

/// Observer that ignores every event
///
/// Useful for tests and for the CLI's quiet mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl WatchObserver for NullObserver {}

impl ProgressObserver for NullObserver {
    fn advance(&self, _done: usize, _total: usize) {}
}
