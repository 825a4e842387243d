/// Raw feed title as delivered by a provider dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTitle<'a> {
    /// Single string in the `[QUALITY] NAME – EPISODE` layout (erai-raws).
    Combined(&'a str),
    /// Name and episode already split into item fields (animeworld).
    Split {
        anime_name: &'a str,
        episode: &'a str,
        /// Provider-side double-episode flag
        double: bool,
    },
}

/// Normalized episode field: numbers plus the completion marker.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeToken {
    /// One entry for a single episode, two for a double-episode range
    pub numbers: Vec<f64>,
    pub is_final: bool,
}

/// Structured result of parsing one feed title.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTitle {
    pub anime_name: String,
    /// Quality tier from the title, when the dialect carries one
    pub quality: Option<String>,
    /// Ordered, never empty. `.5` values denote recaps.
    pub episodes: Vec<f64>,
    pub is_final: bool,
    pub is_double: bool,
}

impl ParsedTitle {
    /// Lowest (first) episode number, used as the match key.
    pub fn first_episode(&self) -> f64 {
        self.episodes.first().copied().unwrap_or(f64::NAN)
    }

    /// Whether this title is the recap sitting half a step below `expected_episode`.
    pub fn is_recap_for(&self, expected_episode: i32) -> bool {
        self.first_episode() == f64::from(expected_episode) - 0.5
    }

    /// Human-readable episode label: `12`, `11.5`, `13-14`.
    pub fn episode_label(&self) -> String {
        self.episodes
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }
}
