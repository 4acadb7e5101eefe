//! Mikro GraphQL client
//!
//! Provides a typed HTTP client for the Mikro data-management service.
//! Handles the GraphQL request/response envelope, bearer-token
//! authentication, multipart file uploads, and streamed payload
//! downloads.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gucker_mikro::client::MikroClient;
//!
//! # fn example() -> anyhow::Result<()> {
//! let client = MikroClient::new("https://mikro.example.org/graphql", Some("token".into()))?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;
use url::Url;

use gucker_core::domain::export::{DatasetExport, StageExport};
use gucker_core::domain::newtypes::{FileHandle, RemoteId};
use gucker_core::domain::watch::UploadedFile;
use gucker_core::ports::data_service::DataService;

use crate::queries;

// ============================================================================
// Wire envelope
// ============================================================================

/// Standard GraphQL response envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<WireError>,
}

/// One entry of the GraphQL `errors` list
#[derive(Debug, Deserialize)]
struct WireError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct StageData {
    stage: Option<StageExport>,
}

#[derive(Debug, Deserialize)]
struct DatasetData {
    dataset: Option<DatasetExport>,
}

#[derive(Debug, Deserialize)]
struct RepresentationStoreData {
    representation: Option<StoreOnly>,
}

#[derive(Debug, Deserialize)]
struct StoreOnly {
    store: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    #[serde(rename = "uploadOmeroFile", alias = "uploadBigFile")]
    uploaded: UploadedRecord,
}

#[derive(Debug, Deserialize)]
struct UploadedRecord {
    id: RemoteId,
    name: String,
}

// ============================================================================
// MikroClient
// ============================================================================

/// HTTP client for the Mikro GraphQL service
///
/// Wraps `reqwest::Client` with the service endpoint and an optional
/// bearer token. Download handles are resolved relative to the
/// endpoint, so the same client reaches both the GraphQL resolver and
/// the media storage behind it.
pub struct MikroClient {
    /// The underlying HTTP client
    http: Client,
    /// GraphQL endpoint of the service
    endpoint: Url,
    /// Bearer token provisioned by the surrounding deployment
    token: Option<String>,
}

impl MikroClient {
    /// Creates a client for the given GraphQL endpoint
    pub fn new(endpoint: &str, token: Option<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint).context("Invalid Mikro endpoint URL")?;
        Ok(Self {
            http: Client::new(),
            endpoint,
            token,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Resolves a download handle against the service endpoint
    ///
    /// Handles are relative paths like `media/a.czi`; absolute URLs in
    /// a handle pass through unchanged.
    fn resolve(&self, handle: &FileHandle) -> Result<Url> {
        self.endpoint
            .join(handle.as_str())
            .with_context(|| format!("Cannot resolve download handle '{handle}'"))
    }

    /// Executes a GraphQL query and unwraps the response envelope
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let request = self
            .authorize(self.http.post(self.endpoint.clone()))
            .json(&serde_json::json!({ "query": query, "variables": variables }));

        let response = request
            .send()
            .await
            .context("GraphQL request failed")?
            .error_for_status()
            .context("GraphQL request rejected")?;

        let envelope: Envelope<T> = response
            .json()
            .await
            .context("Malformed GraphQL response")?;

        if !envelope.errors.is_empty() {
            let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
            anyhow::bail!("GraphQL errors: {}", messages.join("; "));
        }

        envelope
            .data
            .ok_or_else(|| anyhow::anyhow!("GraphQL response carried no data"))
    }

    /// Sends a GraphQL multipart upload request
    ///
    /// Follows the GraphQL multipart request convention: an
    /// `operations` field with the query and a null `file` variable, a
    /// `map` field binding part `0` to that variable, and the file
    /// itself as part `0`.
    async fn upload_multipart(
        &self,
        query: &str,
        path: &Path,
        dataset: Option<&RemoteId>,
        part: Part,
    ) -> Result<UploadedFile> {
        let datasets = dataset.map(|d| vec![d.as_str()]);
        let operations = serde_json::json!({
            "query": query,
            "variables": { "file": null, "datasets": datasets },
        });
        let map = serde_json::json!({ "0": ["variables.file"] });

        let form = Form::new()
            .text("operations", operations.to_string())
            .text("map", map.to_string())
            .part("0", part);

        let response = self
            .authorize(self.http.post(self.endpoint.clone()))
            .multipart(form)
            .send()
            .await
            .context("Upload request failed")?
            .error_for_status()
            .context("Upload rejected")?;

        let envelope: Envelope<UploadData> = response
            .json()
            .await
            .context("Malformed upload response")?;

        if !envelope.errors.is_empty() {
            let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
            anyhow::bail!("Upload failed: {}", messages.join("; "));
        }

        let record = envelope
            .data
            .ok_or_else(|| anyhow::anyhow!("Upload response carried no data"))?
            .uploaded;

        debug!(id = %record.id, name = %record.name, "File uploaded");

        Ok(UploadedFile {
            id: record.id,
            name: record.name,
            path: path.to_path_buf(),
        })
    }

    fn file_name_of(path: &Path) -> Result<String> {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Path has no usable file name: {}", path.display()))
    }

    /// Streams a GET response body into `destination`
    async fn download_url(&self, url: Url, destination: &Path) -> Result<()> {
        debug!(url = %url, path = %destination.display(), "Downloading payload");

        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .context("Download request failed")?
            .error_for_status()
            .context("Download rejected")?;

        let mut stream = response.bytes_stream();
        let mut file = tokio::fs::File::create(destination)
            .await
            .with_context(|| format!("Cannot create {}", destination.display()))?;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("Download stream interrupted")?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl DataService for MikroClient {
    async fn upload(&self, path: &Path, dataset: Option<&RemoteId>) -> Result<UploadedFile> {
        let name = Self::file_name_of(path)?;
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let part = Part::bytes(bytes).file_name(name);

        self.upload_multipart(queries::UPLOAD_FILE, path, dataset, part)
            .await
    }

    async fn upload_big_file(
        &self,
        path: &Path,
        dataset: Option<&RemoteId>,
    ) -> Result<UploadedFile> {
        let name = Self::file_name_of(path)?;
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Cannot open {}", path.display()))?;
        let part = Part::stream(Body::wrap_stream(ReaderStream::new(file))).file_name(name);

        self.upload_multipart(queries::UPLOAD_BIG_FILE, path, dataset, part)
            .await
    }

    async fn fetch_stage_export(&self, id: &RemoteId) -> Result<Option<StageExport>> {
        let data: StageData = self
            .execute(
                queries::EXPORT_STAGE,
                serde_json::json!({ "id": id.as_str() }),
            )
            .await?;
        Ok(data.stage)
    }

    async fn fetch_dataset_export(&self, id: &RemoteId) -> Result<Option<DatasetExport>> {
        let data: DatasetData = self
            .execute(
                queries::EXPORT_DATASET,
                serde_json::json!({ "id": id.as_str() }),
            )
            .await?;
        Ok(data.dataset)
    }

    async fn download(&self, handle: &FileHandle, destination: &Path) -> Result<()> {
        let url = self.resolve(handle)?;
        self.download_url(url, destination).await
    }

    async fn download_representation(&self, id: &RemoteId, destination: &Path) -> Result<()> {
        let data: RepresentationStoreData = self
            .execute(
                queries::REPRESENTATION_STORE,
                serde_json::json!({ "id": id.as_str() }),
            )
            .await?;

        let store = data
            .representation
            .ok_or_else(|| anyhow::anyhow!("Representation '{id}' not found"))?
            .store
            .ok_or_else(|| anyhow::anyhow!("Representation '{id}' has no stored payload"))?;

        let url = self.resolve(&FileHandle::new(store))?;
        self.download_url(url, destination).await
    }
}
