//! Telegram Bot API client library.
//!
//! This crate provides a simple client for sending text messages via the Telegram Bot API.
//!
//! # Example
//!
//! ```rust,ignore
//! use telegram::TelegramClient;
//!
//! let client = TelegramClient::new(reqwest::Client::new(), "BOT_TOKEN", 123456789);
//! client.send_message("Add Show - 12.mkv in the download torrent queue").await?;
//! ```

mod client;
mod error;

pub use client::TelegramClient;
pub use error::TelegramError;
