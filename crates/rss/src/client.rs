use reqwest::{Client, Url};
use scraper::{Html, Selector};

use crate::error::RssError;
use crate::models::{RssItem, RssSource};
use crate::parsers::{parse_anime_world_feed, parse_erai_raws_feed};

/// Anchors carrying the direct video link on an animeworld episode page, in preference order
const DIRECT_LINK_SELECTORS: &[&str] = &["a#alternativeDownloadLink", "a#downloadLink"];

/// Feed fetcher client
pub struct RssClient {
    client: Client,
}

impl RssClient {
    /// Create a new RssClient with a custom reqwest Client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch and parse a feed
    ///
    /// # Arguments
    /// * `source` - The feed source to fetch from
    ///
    /// # Returns
    /// Feed items in the order the provider returned them
    ///
    /// # Example
    /// ```no_run
    /// use rss::{RssClient, RssSource};
    ///
    /// # async fn example() -> rss::Result<()> {
    /// let client = RssClient::with_client(reqwest::Client::new());
    /// let items = client
    ///     .fetch(&RssSource::EraiRaws("https://www.erai-raws.info/feed/?res=1080p".into()))
    ///     .await?;
    ///
    /// for item in items {
    ///     println!("{}", item.title());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch(&self, source: &RssSource) -> crate::Result<Vec<RssItem>> {
        let url = source.url();
        tracing::debug!("Fetching feed from: {}", url);

        let bytes = self.get_bytes(url).await?;

        let items: Vec<RssItem> = match source {
            RssSource::EraiRaws(_) => {
                let items = parse_erai_raws_feed(&bytes)?;
                items.into_iter().map(RssItem::EraiRaws).collect()
            }
            RssSource::AnimeWorld(_) => {
                let items = parse_anime_world_feed(&bytes)?;
                items.into_iter().map(RssItem::AnimeWorld).collect()
            }
        };

        tracing::debug!("Parsed {} items from feed", items.len());
        Ok(items)
    }

    /// Resolve the direct video URL from an animeworld episode page.
    ///
    /// Relative links are resolved against the page URL.
    pub async fn resolve_direct_link(&self, page_url: &str) -> crate::Result<String> {
        let bytes = self.get_bytes(page_url).await?;
        let html = String::from_utf8_lossy(&bytes);
        let document = Html::parse_document(&html);

        for raw in DIRECT_LINK_SELECTORS {
            let selector = Selector::parse(raw).map_err(|e| RssError::Parse(e.to_string()))?;
            let href = document
                .select(&selector)
                .filter_map(|el| el.value().attr("href"))
                .map(str::trim)
                .find(|href| !href.is_empty());

            if let Some(href) = href {
                let base = Url::parse(page_url).map_err(|e| RssError::Parse(e.to_string()))?;
                let link = base.join(href).map_err(|e| RssError::Parse(e.to_string()))?;
                return Ok(link.to_string());
            }
        }

        Err(RssError::DirectLinkNotFound(page_url.to_string()))
    }

    async fn get_bytes(&self, url: &str) -> crate::Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(RssError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
