use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Feed provider a release is followed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Site {
    #[serde(rename = "erai-raws")]
    EraiRaws,
    #[serde(rename = "animeworld")]
    AnimeWorld,
}

impl Site {
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::EraiRaws => "erai-raws",
            Site::AnimeWorld => "animeworld",
        }
    }
}

impl FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "erai-raws" => Ok(Site::EraiRaws),
            "animeworld" => Ok(Site::AnimeWorld),
            other => Err(format!("unknown site '{}'", other)),
        }
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Quality {
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::P480 => "480p",
            Quality::P720 => "720p",
            Quality::P1080 => "1080p",
        }
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "480p" => Ok(Quality::P480),
            "720p" => Ok(Quality::P720),
            "1080p" => Ok(Quality::P1080),
            other => Err(format!("unknown quality '{}'", other)),
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A series the reconciliation loop is waiting to advance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedRelease {
    /// Match key: feed titles must contain this as a substring
    pub name: String,
    pub site: Site,
    /// Next episode number expected on the feed
    pub expected_episode: i32,
    pub quality: Quality,
    /// The record is not checked before this instant
    pub next_check_not_before: DateTime<Utc>,
}

impl TrackedRelease {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_check_not_before <= now
    }
}

/// Listing row served by `GET /show`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrackedReleaseView {
    pub name: String,
    pub site: Site,
    /// Next check time, RFC 2822 in server local time
    pub date: String,
    pub episode: i32,
    pub quality: Quality,
}

impl From<&TrackedRelease> for TrackedReleaseView {
    fn from(release: &TrackedRelease) -> Self {
        Self {
            name: release.name.clone(),
            site: release.site,
            date: release
                .next_check_not_before
                .with_timezone(&Local)
                .to_rfc2822(),
            episode: release.expected_episode,
            quality: release.quality,
        }
    }
}
