//! Remote data service port (driven/secondary port)
//!
//! This module defines the interface to the GraphQL-based data
//! management service. The primary implementation lives in the
//! `gucker-mikro` crate, but the engines only depend on the shapes
//! here: upload a local file, fetch an export fragment, download a
//! stored payload.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific; the engines map them into their own taxonomy
//!   (`WatchError::Upload`, `ExportError::Fetch`, ...).
//! - Fetch methods return `Ok(None)` when the id does not resolve, so
//!   the walker can distinguish not-found from transport failures.
//! - Uses `#[async_trait]` for async trait methods.

use std::path::Path;

use crate::domain::export::{DatasetExport, StageExport};
use crate::domain::newtypes::{FileHandle, RemoteId};
use crate::domain::watch::UploadedFile;

/// Port trait for the remote data-management service
///
/// All network interaction of the watch and export engines goes through
/// this trait. Calls are sequential per operation; implementations do
/// not need internal queueing.
#[async_trait::async_trait]
pub trait DataService: Send + Sync {
    /// Uploads a local file, optionally attaching it to a dataset
    ///
    /// # Arguments
    /// * `path` - Local file to upload
    /// * `dataset` - Dataset the file record should belong to
    ///
    /// # Returns
    /// The created remote file record
    async fn upload(
        &self,
        path: &Path,
        dataset: Option<&RemoteId>,
    ) -> anyhow::Result<UploadedFile>;

    /// Uploads a large file as a streamed payload
    ///
    /// Same contract as [`upload`](DataService::upload); implementations
    /// stream the body instead of buffering it.
    async fn upload_big_file(
        &self,
        path: &Path,
        dataset: Option<&RemoteId>,
    ) -> anyhow::Result<UploadedFile>;

    /// Fetches the nested export fragment for a stage
    ///
    /// # Returns
    /// `Ok(None)` when the id does not resolve remotely
    async fn fetch_stage_export(&self, id: &RemoteId) -> anyhow::Result<Option<StageExport>>;

    /// Fetches the export fragment for a dataset
    ///
    /// # Returns
    /// `Ok(None)` when the id does not resolve remotely
    async fn fetch_dataset_export(&self, id: &RemoteId)
        -> anyhow::Result<Option<DatasetExport>>;

    /// Downloads a stored file payload to a local path
    async fn download(&self, handle: &FileHandle, destination: &Path) -> anyhow::Result<()>;

    /// Downloads a representation's raw pixel data to a local path
    ///
    /// The payload is the TIFF rendering of the stored 5-dimensional
    /// array.
    async fn download_representation(
        &self,
        id: &RemoteId,
        destination: &Path,
    ) -> anyhow::Result<()>;
}
