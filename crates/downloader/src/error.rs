use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloaderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Download queue rejected request: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, DownloaderError>;
