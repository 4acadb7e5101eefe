//! Mikro adapter for Gucker
//!
//! Implements the core's [`DataService`](gucker_core::ports::data_service::DataService)
//! port against the Mikro GraphQL service: query POSTs for the export
//! fragments, multipart uploads for new files, and streamed GETs for
//! stored payloads.

pub mod client;
pub mod queries;

pub use client::MikroClient;
