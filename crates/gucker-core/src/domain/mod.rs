//! Domain entities and value types
//!
//! Pure data and invariants, no I/O. The export types are read-only
//! snapshots of the remote object graph; the watch types describe one
//! polling session over a local directory.

pub mod errors;
pub mod export;
pub mod newtypes;
pub mod watch;
