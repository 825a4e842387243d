use async_trait::async_trait;
use parser::{ParsedTitle, RawTitle, TitleParser};
use rss::{RssClient, RssError, RssItem, RssSource};
use thiserror::Error;

use crate::models::{Candidate, DownloadKind, FeedSettings, Quality, Site};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("No feed configured for {site} at {quality}")]
    Unsupported { site: Site, quality: Quality },
    #[error(transparent)]
    Rss(#[from] RssError),
}

/// Network side of a feed provider
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, source: &RssSource) -> Result<Vec<RssItem>, FetchError>;

    /// Direct video URL behind an episode page
    async fn resolve_direct_link(&self, page_url: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl FeedFetcher for RssClient {
    async fn fetch(&self, source: &RssSource) -> Result<Vec<RssItem>, FetchError> {
        Ok(RssClient::fetch(self, source).await?)
    }

    async fn resolve_direct_link(&self, page_url: &str) -> Result<String, FetchError> {
        Ok(RssClient::resolve_direct_link(self, page_url).await?)
    }
}

/// Feed provider dialect chosen from a record's site and quality
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedProvider {
    /// Magnet feed, one URL per quality tier, combined titles
    EraiRaws { url: String },
    /// Direct-download feed, 720p only, split titles
    AnimeWorld { url: String },
}

impl FeedProvider {
    pub fn select(site: Site, quality: Quality, feeds: &FeedSettings) -> Result<Self, FetchError> {
        let unsupported = || FetchError::Unsupported { site, quality };

        let provider = match (site, quality) {
            (Site::EraiRaws, Quality::P1080) => Self::EraiRaws {
                url: feeds.erai_raws_1080p.clone(),
            },
            (Site::EraiRaws, Quality::P720) => Self::EraiRaws {
                url: feeds.erai_raws_720p.clone(),
            },
            (Site::EraiRaws, Quality::P480) => Self::EraiRaws {
                url: feeds.erai_raws_480p.clone(),
            },
            (Site::AnimeWorld, Quality::P720) => Self::AnimeWorld {
                url: feeds.anime_world.clone(),
            },
            (Site::AnimeWorld, _) => return Err(unsupported()),
        };

        if provider.url().trim().is_empty() {
            return Err(unsupported());
        }
        Ok(provider)
    }

    pub fn url(&self) -> &str {
        match self {
            Self::EraiRaws { url } | Self::AnimeWorld { url } => url,
        }
    }

    pub fn site(&self) -> Site {
        match self {
            Self::EraiRaws { .. } => Site::EraiRaws,
            Self::AnimeWorld { .. } => Site::AnimeWorld,
        }
    }

    pub fn source(&self) -> RssSource {
        match self {
            Self::EraiRaws { url } => RssSource::EraiRaws(url.clone()),
            Self::AnimeWorld { url } => RssSource::AnimeWorld(url.clone()),
        }
    }

    /// Items in provider order
    pub async fn fetch_items(&self, fetcher: &dyn FeedFetcher) -> Result<Vec<RssItem>, FetchError> {
        fetcher.fetch(&self.source()).await
    }

    pub fn parse_item(&self, parser: &TitleParser, item: &RssItem) -> parser::Result<ParsedTitle> {
        let raw = match item {
            RssItem::EraiRaws(item) => RawTitle::Combined(&item.title),
            RssItem::AnimeWorld(item) => RawTitle::Split {
                anime_name: &item.anime_name,
                episode: &item.episode,
                double: item.double,
            },
        };
        parser.parse(raw)
    }

    /// Build the dispatchable candidate for an accepted item.
    ///
    /// animeworld items link to an episode page; the direct video link is resolved here
    /// and the page becomes the referer.
    pub async fn into_candidate(
        &self,
        fetcher: &dyn FeedFetcher,
        parsed: ParsedTitle,
        item: &RssItem,
    ) -> Result<Candidate, FetchError> {
        match self {
            Self::EraiRaws { .. } => Ok(Candidate::from_parsed(
                parsed,
                item.link(),
                "",
                item.pub_date(),
                DownloadKind::Torrent,
            )),
            Self::AnimeWorld { .. } => {
                let direct = fetcher.resolve_direct_link(item.link()).await?;
                Ok(Candidate::from_parsed(
                    parsed,
                    direct,
                    item.link(),
                    item.pub_date(),
                    DownloadKind::Direct,
                ))
            }
        }
    }
}
