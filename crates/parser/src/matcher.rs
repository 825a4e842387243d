use crate::models::ParsedTitle;

/// How a parsed title relates to the episode a tracked release is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    /// Different series, or an episode number that is neither expected nor a recap
    None,
    /// The expected episode
    Normal,
    /// Half a step below the expected episode; never advances the record
    Recap,
    /// The expected episode, carrying the completion marker
    Final,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchOutcome::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOutcome::None => "none",
            MatchOutcome::Normal => "normal",
            MatchOutcome::Recap => "recap",
            MatchOutcome::Final => "final",
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare a parsed title against a tracked release.
///
/// The name check is a plain substring test: `"Shingeki"` matches
/// `"Shingeki no Kyojin"`, and also any other title containing it.
/// A final marker on a recap keeps the outcome at [`MatchOutcome::Recap`].
pub fn match_episode(tracked_name: &str, expected_episode: i32, parsed: &ParsedTitle) -> MatchOutcome {
    if !parsed.anime_name.contains(tracked_name) {
        return MatchOutcome::None;
    }

    let first = parsed.first_episode();
    let expected = f64::from(expected_episode);

    if first == expected {
        if parsed.is_final {
            MatchOutcome::Final
        } else {
            MatchOutcome::Normal
        }
    } else if first == expected - 0.5 {
        MatchOutcome::Recap
    } else {
        MatchOutcome::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(name: &str, episodes: &[f64], is_final: bool) -> ParsedTitle {
        ParsedTitle {
            anime_name: name.to_string(),
            quality: Some("1080p".to_string()),
            episodes: episodes.to_vec(),
            is_final,
            is_double: episodes.len() == 2,
        }
    }

    #[test]
    fn test_normal_match() {
        let parsed = title("Show Name", &[12.0], false);
        assert_eq!(match_episode("Show Name", 12, &parsed), MatchOutcome::Normal);
    }

    #[test]
    fn test_final_match() {
        let parsed = title("Show Name", &[12.0], true);
        assert_eq!(match_episode("Show Name", 12, &parsed), MatchOutcome::Final);
    }

    #[test]
    fn test_recap_match() {
        let parsed = title("Show Name", &[11.5], false);
        assert_eq!(match_episode("Show Name", 12, &parsed), MatchOutcome::Recap);
    }

    #[test]
    fn test_recap_with_final_marker_stays_recap() {
        let parsed = title("Show Name", &[11.5], true);
        assert_eq!(match_episode("Show Name", 12, &parsed), MatchOutcome::Recap);
    }

    #[test]
    fn test_double_episode_matches_on_first_number() {
        let parsed = title("Show Name", &[12.0, 13.0], false);
        assert_eq!(match_episode("Show Name", 12, &parsed), MatchOutcome::Normal);
        assert_eq!(match_episode("Show Name", 13, &parsed), MatchOutcome::None);
    }

    #[test]
    fn test_other_episode_numbers_do_not_match() {
        assert_eq!(
            match_episode("Show Name", 12, &title("Show Name", &[11.0], false)),
            MatchOutcome::None
        );
        assert_eq!(
            match_episode("Show Name", 12, &title("Show Name", &[12.5], false)),
            MatchOutcome::None
        );
        assert_eq!(
            match_episode("Show Name", 12, &title("Show Name", &[13.0], false)),
            MatchOutcome::None
        );
    }

    #[test]
    fn test_name_is_substring_match() {
        let parsed = title("Shingeki no Kyojin The Final Season", &[12.0], false);
        assert_eq!(match_episode("Shingeki no Kyojin", 12, &parsed), MatchOutcome::Normal);
        assert_eq!(match_episode("Kyojin", 12, &parsed), MatchOutcome::Normal);
        assert_eq!(match_episode("Boku no Hero", 12, &parsed), MatchOutcome::None);
        // Case sensitive
        assert_eq!(match_episode("shingeki", 12, &parsed), MatchOutcome::None);
    }

    #[test]
    fn test_outcome_flags() {
        assert!(!MatchOutcome::None.is_match());
        assert!(MatchOutcome::Normal.is_match());
        assert!(MatchOutcome::Recap.is_match());
        assert!(MatchOutcome::Final.is_match());
        assert_eq!(MatchOutcome::Recap.to_string(), "recap");
    }
}
