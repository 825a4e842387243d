use reqwest::{Client, StatusCode};

use crate::error::{DownloaderError, Result};
use crate::models::DownloadRequest;

/// Client for the download-queue service
pub struct DownloadQueueClient {
    client: Client,
    base_url: String,
}

impl DownloadQueueClient {
    /// Create a client for the queue service at `base_url` (e.g. `http://localhost:8090`)
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submit a request to the queue.
    ///
    /// Only HTTP 200 counts as accepted.
    pub async fn add(&self, request: &DownloadRequest) -> Result<()> {
        let url = format!("{}/add", self.base_url);
        tracing::debug!("Queueing download {} -> {}", request.url, request.path_file);

        let resp = self.client.post(&url).json(request).send().await?;
        let status = resp.status();

        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(DownloaderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
