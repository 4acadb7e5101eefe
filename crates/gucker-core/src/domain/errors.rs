//! Domain error types
//!
//! This module defines the error taxonomy for the two operations:
//! watching/uploading (`WatchError`) and exporting (`ExportError`),
//! plus validation failures in domain constructors (`DomainError`).
//!
//! A file failing the scanner's stability probe is deliberately *not*
//! represented here: it is recovered locally by skipping the file for
//! one cycle and never surfaces to callers.

use thiserror::Error;

use super::newtypes::RemoteId;

/// Errors that can occur in domain constructors and validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid remote identifier format
    #[error("Invalid remote id: {0}")]
    InvalidId(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Errors raised by a watch/upload session
#[derive(Debug, Error)]
pub enum WatchError {
    /// No watch directory was selected; fatal, surfaced immediately
    #[error("No watch directory selected")]
    NoDirectory,

    /// The watch pattern is not a valid regular expression
    #[error("Invalid watch pattern: {0}")]
    InvalidPattern(String),

    /// A remote upload call failed; the file is not marked uploaded and
    /// will be retried by a later invocation
    #[error("Upload of '{name}' failed")]
    Upload {
        /// File name that failed to upload
        name: String,
        /// Underlying adapter error
        #[source]
        source: anyhow::Error,
    },

    /// Cancellation was signalled while the loop was sleeping.
    /// Treated as a normal termination path by the host.
    #[error("Watch cancelled")]
    Cancelled,

    /// Directory listing or file removal failed
    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a stage or dataset export
#[derive(Debug, Error)]
pub enum ExportError {
    /// No destination directory was selected; fatal, surfaced immediately
    #[error("No export destination selected")]
    NoDestination,

    /// The requested id does not resolve on the remote service.
    /// Already-written directories/files are left in place (no rollback).
    #[error("Remote object '{0}' not found")]
    NotFound(RemoteId),

    /// Fetching the export fragment failed (network/protocol)
    #[error("Export fetch failed")]
    Fetch(#[source] anyhow::Error),

    /// Downloading a file payload failed
    #[error("Download of '{name}' failed")]
    Download {
        /// Name of the file being downloaded
        name: String,
        /// Underlying adapter error
        #[source]
        source: anyhow::Error,
    },

    /// Serializing a metadata record failed
    #[error("Metadata serialization failed: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Local directory creation or file writing failed
    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_error_display() {
        assert_eq!(
            WatchError::NoDirectory.to_string(),
            "No watch directory selected"
        );
        let err = WatchError::Upload {
            name: "sample_s1_t0.TIF".to_string(),
            source: anyhow::anyhow!("server returned 500"),
        };
        assert_eq!(err.to_string(), "Upload of 'sample_s1_t0.TIF' failed");
    }

    #[test]
    fn test_export_error_not_found_display() {
        let id = RemoteId::new("99").unwrap();
        assert_eq!(
            ExportError::NotFound(id).to_string(),
            "Remote object '99' not found"
        );
    }

    #[test]
    fn test_watch_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: WatchError = io.into();
        assert!(matches!(err, WatchError::Io(_)));
    }

    #[test]
    fn test_domain_error_equality() {
        let a = DomainError::InvalidId("x".to_string());
        let b = DomainError::InvalidId("x".to_string());
        assert_eq!(a, b);
    }
}
