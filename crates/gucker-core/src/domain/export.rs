//! Export snapshot entities
//!
//! Read-only values describing the remote object graph fetched once per
//! export call: stage → positions → omero records → representations →
//! derived representations, and dataset → original files. The walker
//! owns a snapshot exclusively; there is no sharing, mutation, or
//! persistence beyond the files it writes.
//!
//! Field names follow the GraphQL wire format (camelCase) so the same
//! structs deserialize the fetch response and serialize the metadata
//! dumps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::{FileHandle, RemoteId};

/// A remote collection of spatial positions sharing one microscope
/// coordinate frame
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageExport {
    pub id: RemoteId,
    /// The name of the stage
    pub name: String,
    /// Positions in fetch order
    #[serde(default)]
    pub positions: Vec<PositionExport>,
}

/// One physical location on a stage where acquisitions occurred
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionExport {
    pub id: RemoteId,
    /// The name of the position
    pub name: String,
    /// Stage coordinates in microns
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Acquisitions recorded at this position, in fetch order
    #[serde(default)]
    pub omeros: Vec<OmeroExport>,
}

/// Per-acquisition metadata linking a position to one representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OmeroExport {
    /// When the acquisition happened (absent for imported data)
    pub acquisition_date: Option<DateTime<Utc>>,
    /// The stored image this acquisition produced
    pub representation: RepresentationExport,
}

/// A stored 5-dimensional image, or an image derived from one
///
/// Derived representations (filtering, segmentation) link back to their
/// origin recursively; the fetch bounds the depth, and the exporter
/// flattens the whole chain into one per-acquisition directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentationExport {
    pub id: RemoteId,
    /// Cleartext name (may be absent on the wire)
    pub name: Option<String>,
    /// Storage key for the raw pixel data
    pub store: Option<String>,
    /// Images computed from this one
    #[serde(default)]
    pub derived: Vec<RepresentationExport>,
}

impl RepresentationExport {
    /// Name to use in generated file names: the cleartext name, or the
    /// id when the service returned none
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}

/// A collection of originally uploaded files
///
/// Datasets contain only the original uploads, never derived image
/// computations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetExport {
    pub id: RemoteId,
    /// The name of the dataset
    pub name: String,
    /// File records in fetch order
    #[serde(default)]
    pub files: Vec<FileExport>,
}

/// One originally uploaded file within a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileExport {
    pub id: RemoteId,
    /// Original file name, used verbatim on export
    pub name: String,
    /// Detected file format
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Download handle for the stored payload
    pub file: FileHandle,
}

/// File formats the service distinguishes on upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileKind {
    Tiff,
    Jpeg,
    /// Abberior MSR file
    Msr,
    /// Zeiss microscopy file
    Czi,
    Unknown,
}
