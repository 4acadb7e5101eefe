//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for remote identifiers and download handles.
//! Each newtype ensures data validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// RemoteId
// ============================================================================

/// Identifier assigned by the remote data service
///
/// Mikro ids are opaque non-empty strings (typically decimal, but the
/// format is not guaranteed). They appear verbatim in export directory
/// names, so surrounding whitespace is rejected as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteId(String);

impl RemoteId {
    /// Create a RemoteId, validating that it is non-empty and trimmed
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::InvalidId("empty remote id".to_string()));
        }
        if id.trim() != id {
            return Err(DomainError::InvalidId(format!(
                "remote id has surrounding whitespace: {id:?}"
            )));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RemoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RemoteId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// FileHandle
// ============================================================================

/// Opaque key identifying a stored file payload on the remote service
///
/// Returned inside export fragments and passed back to the download
/// port. The core never interprets the contents; the Mikro adapter
/// resolves it against its endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileHandle(String);

impl FileHandle {
    /// Wrap a raw handle string
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Get the handle as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FileHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_id_valid() {
        let id = RemoteId::new("4882").unwrap();
        assert_eq!(id.as_str(), "4882");
        assert_eq!(id.to_string(), "4882");
    }

    #[test]
    fn test_remote_id_rejects_empty() {
        assert!(RemoteId::new("").is_err());
    }

    #[test]
    fn test_remote_id_rejects_whitespace() {
        assert!(RemoteId::new(" 4882").is_err());
        assert!(RemoteId::new("4882\n").is_err());
    }

    #[test]
    fn test_remote_id_from_str() {
        let id: RemoteId = "stage-1".parse().unwrap();
        assert_eq!(id.as_str(), "stage-1");
    }

    #[test]
    fn test_remote_id_serde_transparent() {
        let id = RemoteId::new("77").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"77\"");
        let back: RemoteId = serde_json::from_str("\"77\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_file_handle_roundtrip() {
        let handle = FileHandle::new("media/files/a.czi");
        assert_eq!(handle.as_str(), "media/files/a.czi");
        assert_eq!(
            serde_json::to_string(&handle).unwrap(),
            "\"media/files/a.czi\""
        );
    }
}
