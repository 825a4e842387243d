use thiserror::Error;

/// Telegram API errors
#[derive(Debug, Error)]
pub enum TelegramError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Telegram API returned a non-200 status
    #[error("Telegram API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },
}
