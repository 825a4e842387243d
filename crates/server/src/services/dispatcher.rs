use async_trait::async_trait;
use downloader::{DownloadQueueClient, DownloadRequest, DownloaderError};
use pathgen::{PathBuilder, PathGenError};
use reqwest::Url;
use telegram::TelegramClient;
use thiserror::Error;

use crate::models::{Candidate, DownloadKind, PathSettings};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid destination: {0}")]
    Path(#[from] PathGenError),
    #[error("Invalid download link '{0}'")]
    InvalidLink(String),
    #[error("Download queue error: {0}")]
    Queue(#[from] DownloaderError),
}

/// Hands an accepted candidate to the download pipeline
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Queue the download and notify. Returns the file name that was queued.
    ///
    /// An error means nothing was queued and the record must not transition.
    async fn dispatch(&self, candidate: &Candidate) -> Result<String, DispatchError>;
}

/// Destination prefixes for each download kind
#[derive(Debug, Clone)]
pub struct DestinationRule {
    torrent: PathBuilder,
    direct: PathBuilder,
}

impl DestinationRule {
    pub fn new(torrent_prefix: impl Into<String>, direct_prefix: impl Into<String>) -> Self {
        Self {
            torrent: PathBuilder::new().with_prefix(torrent_prefix),
            direct: PathBuilder::new().with_prefix(direct_prefix),
        }
    }

    /// Build the queue request and the file name reported in the notification
    pub fn request_for(
        &self,
        candidate: &Candidate,
    ) -> Result<(DownloadRequest, String), DispatchError> {
        match candidate.kind {
            DownloadKind::Torrent => {
                let directory = self.torrent.build_directory(&candidate.anime_name)?;
                let file_name = magnet_display_name(&candidate.download_link).unwrap_or_else(|| {
                    format!("{} {}", candidate.anime_name, candidate.episode_label())
                });
                let request = DownloadRequest::torrent(&candidate.download_link, directory);
                Ok((request, file_name))
            }
            DownloadKind::Direct => {
                let file_name = link_file_name(&candidate.download_link)
                    .ok_or_else(|| DispatchError::InvalidLink(candidate.download_link.clone()))?;
                let path = self.direct.build_file(&candidate.anime_name, &file_name)?;
                let request =
                    DownloadRequest::direct(&candidate.download_link, &candidate.referer_link, path);
                Ok((request, file_name))
            }
        }
    }
}

impl From<&PathSettings> for DestinationRule {
    fn from(paths: &PathSettings) -> Self {
        Self::new(paths.torrent_prefix.clone(), paths.direct_prefix.clone())
    }
}

/// `dn` parameter of a magnet link
fn magnet_display_name(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "dn")
        .map(|(_, value)| value.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Last path segment of a direct link
fn link_file_name(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    url.path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Dispatcher backed by the download-queue service and an optional Telegram chat
pub struct QueueDispatcher {
    queue: DownloadQueueClient,
    notifier: Option<TelegramClient>,
    rule: DestinationRule,
}

impl QueueDispatcher {
    pub fn new(
        queue: DownloadQueueClient,
        notifier: Option<TelegramClient>,
        rule: DestinationRule,
    ) -> Self {
        Self {
            queue,
            notifier,
            rule,
        }
    }

    async fn notify(&self, text: &str) {
        let Some(notifier) = &self.notifier else {
            tracing::debug!("Telegram not configured, skipping notification: {}", text);
            return;
        };

        if let Err(e) = notifier.send_message(text).await {
            tracing::warn!("Failed to send notification: {}", e);
        }
    }
}

#[async_trait]
impl Dispatcher for QueueDispatcher {
    async fn dispatch(&self, candidate: &Candidate) -> Result<String, DispatchError> {
        let (request, file_name) = self.rule.request_for(candidate)?;

        self.queue.add(&request).await?;
        tracing::info!("Queued {} into {}", file_name, request.path_file);

        let text = match candidate.kind {
            DownloadKind::Torrent => format!("Add {} in the download torrent queue", file_name),
            DownloadKind::Direct => format!("Add {} in the download queue", file_name),
        };
        self.notify(&text).await;

        Ok(file_name)
    }
}
