mod client;
mod error;
pub mod models;
mod parsers;

pub use client::RssClient;
pub use error::RssError;
pub use models::{AnimeWorldItem, EraiRawsItem, RssItem, RssSource};

pub type Result<T> = std::result::Result<T, RssError>;
