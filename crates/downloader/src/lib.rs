mod client;
mod error;
mod models;

pub use client::DownloadQueueClient;
pub use error::{DownloaderError, Result};
pub use models::DownloadRequest;
