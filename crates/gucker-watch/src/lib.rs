//! Gucker watch engine
//!
//! Drives one polling session over a local directory: the
//! [`scanner`] lists matching, stable, not-yet-uploaded files and the
//! [`poll`] loop uploads each exactly once through the data-service
//! port, with cooperative cancellation at the sleep boundary.

pub mod poll;
pub mod scanner;

pub use poll::{PollLoop, WatchSummary};
pub use scanner::{scan, WatchPattern};
