use chrono::{DateTime, Utc};
use parser::ParsedTitle;

/// How the matched item is transferred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    /// Magnet/torrent link
    Torrent,
    /// Direct video link fetched with a referer
    Direct,
}

/// A feed item accepted for a tracked release, ready to dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub anime_name: String,
    /// Ordered; the first entry is the match key
    pub episodes: Vec<f64>,
    pub is_final: bool,
    pub is_double: bool,
    pub quality: Option<String>,
    pub download_link: String,
    /// Empty for torrents
    pub referer_link: String,
    pub published_at: DateTime<Utc>,
    pub kind: DownloadKind,
}

impl Candidate {
    pub fn from_parsed(
        parsed: ParsedTitle,
        download_link: impl Into<String>,
        referer_link: impl Into<String>,
        published_at: DateTime<Utc>,
        kind: DownloadKind,
    ) -> Self {
        Self {
            anime_name: parsed.anime_name,
            episodes: parsed.episodes,
            is_final: parsed.is_final,
            is_double: parsed.is_double,
            quality: parsed.quality,
            download_link: download_link.into(),
            referer_link: referer_link.into(),
            published_at,
            kind,
        }
    }

    pub fn first_episode(&self) -> f64 {
        self.episodes.first().copied().unwrap_or(f64::NAN)
    }

    /// Whether this candidate is the recap half a step below `expected_episode`
    pub fn is_recap_for(&self, expected_episode: i32) -> bool {
        self.first_episode() == f64::from(expected_episode) - 0.5
    }

    /// `12`, `11.5`, `13-14`
    pub fn episode_label(&self) -> String {
        self.episodes
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}
