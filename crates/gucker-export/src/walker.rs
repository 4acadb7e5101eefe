//! Export walker
//!
//! Given a remote stage or dataset id, fetches its export fragment and
//! materializes it onto the local filesystem: one directory per node,
//! a JSON metadata dump per node, and the raw payload for every
//! representation or original file.
//!
//! ## Failure semantics
//!
//! Any fetch or download failure aborts the whole export immediately.
//! There is no rollback: directories and files written before the
//! failure stay on disk, and a successful re-run overwrites them with
//! identical content (directory creation is exist-ok).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use gucker_core::domain::errors::ExportError;
use gucker_core::domain::export::{OmeroExport, RepresentationExport};
use gucker_core::domain::newtypes::RemoteId;
use gucker_core::ports::data_service::DataService;
use gucker_core::ports::notification::ProgressObserver;

use crate::metadata;
use crate::naming;

/// Walks remote export fragments onto a local directory tree
///
/// One walker invocation owns the snapshot it fetched; nothing is
/// shared or mutated concurrently.
pub struct ExportWalker {
    /// Remote fetch and download operations
    service: Arc<dyn DataService>,
}

impl ExportWalker {
    /// Creates a walker over the given data service
    pub fn new(service: Arc<dyn DataService>) -> Self {
        Self { service }
    }

    /// Exports a stage and everything beneath it
    ///
    /// Creates `destination/ID(<id>) <name>`, one directory per
    /// position with its `position.json`, and one directory per
    /// acquisition with its `raw.json`, the root representation's
    /// `.tiff` payload and `meta.json`, and every derived
    /// representation flattened into the same acquisition directory.
    ///
    /// # Errors
    /// - [`ExportError::NoDestination`] when no destination is selected
    /// - [`ExportError::NotFound`] when the id does not resolve
    /// - [`ExportError::Fetch`] / [`ExportError::Download`] on remote
    ///   failures; partially written output remains
    #[tracing::instrument(skip(self, destination, progress))]
    pub async fn export_stage(
        &self,
        stage_id: &RemoteId,
        destination: Option<&Path>,
        progress: &dyn ProgressObserver,
    ) -> Result<PathBuf, ExportError> {
        let destination = destination.ok_or(ExportError::NoDestination)?;

        let stage = self
            .service
            .fetch_stage_export(stage_id)
            .await
            .map_err(ExportError::Fetch)?
            .ok_or_else(|| ExportError::NotFound(stage_id.clone()))?;

        let stage_dir = destination.join(naming::node_dir(&stage.id, &stage.name));
        tokio::fs::create_dir_all(&stage_dir).await?;

        info!(
            stage = %stage.id,
            positions = stage.positions.len(),
            directory = %stage_dir.display(),
            "Exporting stage"
        );

        let total = stage.positions.len();
        for (done, position) in stage.positions.iter().enumerate() {
            let position_dir = stage_dir.join(naming::node_dir(&position.id, &position.name));
            tokio::fs::create_dir_all(&position_dir).await?;
            metadata::write_json(&position_dir.join("position.json"), position).await?;

            for omero in &position.omeros {
                self.export_omero(omero, &position_dir).await?;
            }

            progress.advance(done + 1, total);
        }

        info!(stage = %stage.id, "Stage export finished");
        Ok(stage_dir)
    }

    /// Exports one acquisition: its directory, metadata dump, and the
    /// whole representation chain flattened into that directory
    async fn export_omero(
        &self,
        omero: &OmeroExport,
        position_dir: &Path,
    ) -> Result<(), ExportError> {
        let omero_dir = position_dir.join(naming::omero_dir(
            &omero.representation,
            omero.acquisition_date.as_ref(),
        ));
        tokio::fs::create_dir_all(&omero_dir).await?;
        metadata::write_json(&omero_dir.join("raw.json"), omero).await?;

        self.export_representation(&omero.representation, &omero_dir)
            .await
    }

    /// Writes a representation's payload and metadata, then its derived
    /// representations into the same directory (flattened, not nested)
    fn export_representation<'a>(
        &'a self,
        representation: &'a RepresentationExport,
        directory: &'a Path,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<(), ExportError>> + Send + 'a>,
    > {
        Box::pin(async move {
            let payload = directory.join(naming::representation_file(representation));
            debug!(
                representation = %representation.id,
                path = %payload.display(),
                "Exporting representation payload"
            );

            self.service
                .download_representation(&representation.id, &payload)
                .await
                .map_err(|source| ExportError::Download {
                    name: representation.display_name().to_string(),
                    source,
                })?;

            metadata::write_json(
                &directory.join(naming::representation_meta(representation)),
                representation,
            )
            .await?;

            for derived in &representation.derived {
                self.export_representation(derived, directory).await?;
            }

            Ok(())
        })
    }

    /// Exports a dataset's original files
    ///
    /// Creates `destination/ID(<id>) <name>` and downloads every file
    /// record to its original file name, not prefixed. Only originally
    /// uploaded files are touched, never derived image computations.
    #[tracing::instrument(skip(self, destination, progress))]
    pub async fn export_dataset(
        &self,
        dataset_id: &RemoteId,
        destination: Option<&Path>,
        progress: &dyn ProgressObserver,
    ) -> Result<PathBuf, ExportError> {
        let destination = destination.ok_or(ExportError::NoDestination)?;

        let dataset = self
            .service
            .fetch_dataset_export(dataset_id)
            .await
            .map_err(ExportError::Fetch)?
            .ok_or_else(|| ExportError::NotFound(dataset_id.clone()))?;

        let dataset_dir = destination.join(naming::node_dir(&dataset.id, &dataset.name));
        tokio::fs::create_dir_all(&dataset_dir).await?;

        info!(
            dataset = %dataset.id,
            files = dataset.files.len(),
            directory = %dataset_dir.display(),
            "Exporting dataset"
        );

        let total = dataset.files.len();
        for (done, file) in dataset.files.iter().enumerate() {
            let local = dataset_dir.join(&file.name);
            debug!(name = %file.name, "Downloading original file");

            self.service
                .download(&file.file, &local)
                .await
                .map_err(|source| ExportError::Download {
                    name: file.name.clone(),
                    source,
                })?;

            progress.advance(done + 1, total);
        }

        info!(dataset = %dataset.id, "Dataset export finished");
        Ok(dataset_dir)
    }
}
