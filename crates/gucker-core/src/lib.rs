//! Gucker Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `WatchTarget`, `UploadTracker`, `StageExport`, `DatasetExport`
//! - **Port definitions** - Traits for adapters: `DataService`, `WatchObserver`, `ProgressObserver`
//! - **Configuration** - Typed YAML configuration with defaults
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement: the watch and
//! export engines drive the ports, the `gucker-mikro` crate implements the
//! remote side against the Mikro GraphQL service.

pub mod config;
pub mod domain;
pub mod ports;
