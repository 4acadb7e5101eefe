//! Port definitions (hexagonal architecture)
//!
//! Traits at the boundary between the engines and their adapters:
//! the remote data service on one side, lifecycle/progress observers
//! on the other.

pub mod data_service;
pub mod notification;
