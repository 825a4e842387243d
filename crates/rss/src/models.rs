use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feed source with URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RssSource {
    /// erai-raws magnet feed for one quality tier
    EraiRaws(String),
    /// animeworld latest-episodes feed
    AnimeWorld(String),
}

impl RssSource {
    /// Get the URL of this feed source
    pub fn url(&self) -> &str {
        match self {
            RssSource::EraiRaws(url) | RssSource::AnimeWorld(url) => url,
        }
    }
}

/// Unified feed item enum that wraps source-specific items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RssItem {
    EraiRaws(EraiRawsItem),
    AnimeWorld(AnimeWorldItem),
}

impl RssItem {
    /// Get the raw title of the feed item
    pub fn title(&self) -> &str {
        match self {
            RssItem::EraiRaws(item) => &item.title,
            RssItem::AnimeWorld(item) => &item.title,
        }
    }

    /// Get the item link (magnet for erai-raws, episode page for animeworld)
    pub fn link(&self) -> &str {
        match self {
            RssItem::EraiRaws(item) => &item.link,
            RssItem::AnimeWorld(item) => &item.link,
        }
    }

    /// Get the publish time
    pub fn pub_date(&self) -> DateTime<Utc> {
        match self {
            RssItem::EraiRaws(item) => item.pub_date,
            RssItem::AnimeWorld(item) => item.pub_date,
        }
    }
}

/// erai-raws item. The title is `[QUALITY] NAME – EPISODE`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EraiRawsItem {
    pub title: String,
    /// Magnet link
    pub link: String,
    pub pub_date: DateTime<Utc>,
}

/// animeworld item with the name and episode already split out of the title
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimeWorldItem {
    pub title: String,
    pub anime_name: String,
    /// Raw episode token, e.g. `12`, `12v2`, `13-14`
    pub episode: String,
    /// Whether the item covers two episodes
    pub double: bool,
    /// Episode page; the direct video link is resolved from it
    pub link: String,
    pub pub_date: DateTime<Utc>,
}
