//! HTTP client for the data backend.

use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::error::{Error, Result};
use crate::model::{ChartResult, Metadata};
use crate::query::{DataQuery, DownloadQuery, METADATA_PATH};

/// HTTP client for the `/metadata`, `/data` and `/download` endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    /// Create a new client for the backend rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Backend root URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the metadata endpoint.
    pub fn metadata_url(&self) -> String {
        format!("{}{}", self.base_url, METADATA_PATH)
    }

    /// Full URL of a chart data request.
    pub fn data_url(&self, query: &DataQuery) -> String {
        format!("{}{}", self.base_url, query.path_and_query())
    }

    /// Full URL of a CSV export.
    pub fn download_url(&self, query: &DownloadQuery) -> String {
        format!("{}{}", self.base_url, query.path_and_query())
    }

    /// Fetch the descriptive catalog.
    pub async fn fetch_metadata(&self) -> Result<Metadata> {
        let url = self.metadata_url();
        tracing::debug!(url = %url, "Fetching metadata");

        let body = self.get(&url, "metadata").await?.bytes().await?;
        let metadata: Metadata = serde_json::from_slice(&body)?;
        metadata.validate()?;

        tracing::info!(
            countries = metadata.countries.len(),
            metrics = metadata.metrics.len(),
            min_year = metadata.years.min,
            max_year = metadata.years.max,
            "Metadata loaded"
        );

        Ok(metadata)
    }

    /// Fetch chart series for the given selection.
    pub async fn fetch_data(&self, query: &DataQuery) -> Result<ChartResult> {
        let url = self.data_url(query);
        tracing::debug!(url = %url, "Fetching chart data");

        let body = self.get(&url, "data").await?.bytes().await?;
        let result: ChartResult = serde_json::from_slice(&body)?;
        Ok(result)
    }

    /// Fetch the raw CSV bytes of an export.
    pub async fn download(&self, query: &DownloadQuery) -> Result<Vec<u8>> {
        let url = self.download_url(query);
        tracing::debug!(url = %url, "Downloading CSV");

        let bytes = self.get(&url, "download").await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Download a CSV export into `dir`, returning the written path.
    pub async fn download_to(&self, query: &DownloadQuery, dir: &Path) -> Result<PathBuf> {
        let bytes = self.download(query).await?;

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(query.file_name());
        tokio::fs::write(&path, &bytes).await?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "CSV export saved");
        Ok(path)
    }

    async fn get(&self, url: &str, endpoint: &'static str) -> Result<reqwest::Response> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint, status = %status, "Backend request failed");
            return Err(Error::Status { endpoint, status });
        }
        Ok(response)
    }
}
