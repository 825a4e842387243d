use serde::{Deserialize, Serialize};

/// Body of a download-queue submission.
///
/// Serialized as `{url, referer, pathFile, torrent, sizeRed}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    /// Source URL (magnet link or direct video link)
    pub url: String,
    /// Referer header for the transfer; empty for magnet links
    pub referer: String,
    /// Destination directory (torrent) or file path (direct)
    pub path_file: String,
    /// Whether the source is a magnet/torrent link
    pub torrent: bool,
    /// Whether the content size is already known
    pub size_red: bool,
}

impl DownloadRequest {
    /// Request for a magnet/torrent link saved into `directory`
    pub fn torrent(url: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            referer: String::new(),
            path_file: directory.into(),
            torrent: true,
            size_red: false,
        }
    }

    /// Request for a direct video link saved as `file_path`
    pub fn direct(
        url: impl Into<String>,
        referer: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            referer: referer.into(),
            path_file: file_path.into(),
            torrent: false,
            size_red: false,
        }
    }
}
