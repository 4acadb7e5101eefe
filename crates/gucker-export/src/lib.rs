//! Gucker export engine
//!
//! Mirrors a remote object graph (stage → positions → omero records →
//! representations → derived representations, or dataset → files) onto
//! a local directory tree with deterministic [`naming`] and JSON
//! [`metadata`] dumps per node. The [`walker`] drives the fetch and
//! download ports.

pub mod metadata;
pub mod naming;
pub mod walker;

pub use walker::ExportWalker;
