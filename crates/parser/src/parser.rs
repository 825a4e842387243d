use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ParseError, Result};
use crate::models::{EpisodeToken, ParsedTitle, RawTitle};

/// Separator between the name and the episode field in combined titles (en dash)
const TITLE_SEPARATOR: &str = " – ";

/// Separator inside double-episode tokens: `13-14`
const RANGE_SEPARATOR: char = '-';

/// Secondary field marking the last episode of a series: `12 END`
const FINAL_MARKER: &str = "END";

// Revision suffix on re-released episodes: 13v2, 07V3
static REVISION_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[vV]\d+$").unwrap());

/// Feed title parser for all provider dialects
#[derive(Debug, Clone, Default)]
pub struct TitleParser;

impl TitleParser {
    pub fn new() -> Self {
        Self {}
    }

    /// Parse a raw title into its structured parts.
    ///
    /// Errors are per item: callers skip the item and keep scanning.
    pub fn parse(&self, raw: RawTitle<'_>) -> Result<ParsedTitle> {
        match raw {
            RawTitle::Combined(title) => Self::parse_combined(title),
            RawTitle::Split {
                anime_name,
                episode,
                double,
            } => Self::parse_split(anime_name, episode, double),
        }
    }

    /// `[1080p] Show Name – 12 END`
    fn parse_combined(title: &str) -> Result<ParsedTitle> {
        let trimmed = title.trim();

        let (quality, rest) = trimmed
            .strip_prefix('[')
            .and_then(|s| s.split_once(']'))
            .ok_or_else(|| ParseError::MissingQuality(title.to_string()))?;
        let quality = quality.trim();
        if quality.is_empty() {
            return Err(ParseError::MissingQuality(title.to_string()));
        }

        // Name runs up to the first separator, the episode field follows the last one
        let (name, _) = rest
            .split_once(TITLE_SEPARATOR)
            .ok_or_else(|| ParseError::MissingSeparator(title.to_string()))?;
        let (_, episode_field) = rest
            .rsplit_once(TITLE_SEPARATOR)
            .ok_or_else(|| ParseError::MissingSeparator(title.to_string()))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ParseError::EmptyName(title.to_string()));
        }

        let token = parse_episode_field(episode_field)?;

        Ok(ParsedTitle {
            anime_name: name.to_string(),
            quality: Some(quality.to_string()),
            is_double: token.numbers.len() == 2,
            episodes: token.numbers,
            is_final: token.is_final,
        })
    }

    fn parse_split(anime_name: &str, episode: &str, double: bool) -> Result<ParsedTitle> {
        let name = anime_name.trim();
        if name.is_empty() {
            return Err(ParseError::EmptyName(anime_name.to_string()));
        }

        let token = parse_episode_field(episode)?;

        Ok(ParsedTitle {
            anime_name: name.to_string(),
            quality: None,
            is_double: double || token.numbers.len() == 2,
            episodes: token.numbers,
            is_final: token.is_final,
        })
    }
}

/// Normalize an episode field such as `13`, `13v2`, `13-14` or `13 END`.
///
/// The first whitespace-delimited field is the numeric token; a second field equal to
/// `END` marks the series final.
pub fn parse_episode_field(field: &str) -> Result<EpisodeToken> {
    let mut fields = field.split_whitespace();
    let token = fields.next().ok_or(ParseError::EmptyEpisode)?;
    let is_final = fields
        .next()
        .is_some_and(|marker| marker.eq_ignore_ascii_case(FINAL_MARKER));

    let parts: Vec<&str> = token.split(RANGE_SEPARATOR).collect();
    if parts.len() > 2 {
        return Err(ParseError::InvalidEpisode(token.to_string()));
    }

    let numbers = parts
        .into_iter()
        .map(|part| parse_episode_number(part).ok_or_else(|| ParseError::InvalidEpisode(token.to_string())))
        .collect::<Result<Vec<_>>>()?;

    Ok(EpisodeToken { numbers, is_final })
}

fn parse_episode_number(part: &str) -> Option<f64> {
    let stripped = REVISION_PATTERN.replace(part.trim(), "");
    stripped
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combined(title: &str) -> Result<ParsedTitle> {
        TitleParser::new().parse(RawTitle::Combined(title))
    }

    #[test]
    fn test_parse_combined_title() {
        let parsed = combined("[1080p] Show Name – 12").unwrap();
        assert_eq!(parsed.quality.as_deref(), Some("1080p"));
        assert_eq!(parsed.anime_name, "Show Name");
        assert_eq!(parsed.episodes, vec![12.0]);
        assert!(!parsed.is_final);
        assert!(!parsed.is_double);
    }

    #[test]
    fn test_parse_combined_title_with_final_marker() {
        let parsed = combined("[720p] Kimetsu no Yaiba – 26 END").unwrap();
        assert_eq!(parsed.anime_name, "Kimetsu no Yaiba");
        assert_eq!(parsed.episodes, vec![26.0]);
        assert!(parsed.is_final);
    }

    #[test]
    fn test_parse_combined_title_double_episode() {
        let parsed = combined("[1080p] Show Name – 13-14").unwrap();
        assert_eq!(parsed.episodes, vec![13.0, 14.0]);
        assert!(parsed.is_double);
    }

    #[test]
    fn test_parse_combined_title_recap() {
        let parsed = combined("[1080p] Show Name – 11.5").unwrap();
        assert_eq!(parsed.episodes, vec![11.5]);
        assert!(parsed.is_recap_for(12));
        assert!(!parsed.is_recap_for(11));
    }

    #[test]
    fn test_name_stops_at_first_separator() {
        let parsed = combined("[480p] Show – Part 2 – 05").unwrap();
        assert_eq!(parsed.anime_name, "Show");
        assert_eq!(parsed.episodes, vec![5.0]);
    }

    #[test]
    fn test_revision_suffix_is_stripped() {
        assert_eq!(
            parse_episode_field("13v2").unwrap(),
            parse_episode_field("13").unwrap()
        );
        assert_eq!(parse_episode_field("07V3").unwrap().numbers, vec![7.0]);
        assert_eq!(
            parse_episode_field("13v2-14v2").unwrap().numbers,
            vec![13.0, 14.0]
        );
    }

    #[test]
    fn test_range_token() {
        let token = parse_episode_field("13-14").unwrap();
        assert_eq!(token.numbers, vec![13.0, 14.0]);
        assert!(!token.is_final);
    }

    #[test]
    fn test_final_marker() {
        let token = parse_episode_field("13 END").unwrap();
        assert_eq!(token.numbers, vec![13.0]);
        assert!(token.is_final);

        assert!(parse_episode_field("13 end").unwrap().is_final);
        assert!(!parse_episode_field("13 [Multi]").unwrap().is_final);
    }

    #[test]
    fn test_invalid_tokens() {
        assert_eq!(parse_episode_field(""), Err(ParseError::EmptyEpisode));
        assert_eq!(
            parse_episode_field("abc"),
            Err(ParseError::InvalidEpisode("abc".to_string()))
        );
        assert!(parse_episode_field("v2").is_err());
        assert!(parse_episode_field("1-2-3").is_err());
        assert!(parse_episode_field("13-").is_err());
        assert!(parse_episode_field("NaN").is_err());
        assert!(parse_episode_field("-4").is_err());
    }

    #[test]
    fn test_malformed_combined_titles() {
        assert!(matches!(
            combined("Show Name – 12"),
            Err(ParseError::MissingQuality(_))
        ));
        assert!(matches!(
            combined("[] Show Name – 12"),
            Err(ParseError::MissingQuality(_))
        ));
        assert!(matches!(
            combined("[1080p] Show Name - 12"),
            Err(ParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            combined("[1080p]  – 12"),
            Err(ParseError::EmptyName(_))
        ));
        assert!(matches!(
            combined("[1080p] Show Name – Special"),
            Err(ParseError::InvalidEpisode(_))
        ));
    }

    #[test]
    fn test_parse_split_fields() {
        let parser = TitleParser::new();

        let parsed = parser
            .parse(RawTitle::Split {
                anime_name: " One Piece ",
                episode: "1050",
                double: false,
            })
            .unwrap();
        assert_eq!(parsed.anime_name, "One Piece");
        assert_eq!(parsed.quality, None);
        assert_eq!(parsed.episodes, vec![1050.0]);

        let parsed = parser
            .parse(RawTitle::Split {
                anime_name: "Dr. Stone",
                episode: "10-11",
                double: true,
            })
            .unwrap();
        assert_eq!(parsed.episodes, vec![10.0, 11.0]);
        assert!(parsed.is_double);

        assert!(parser
            .parse(RawTitle::Split {
                anime_name: "",
                episode: "1",
                double: false,
            })
            .is_err());
    }

    #[test]
    fn test_episode_label() {
        assert_eq!(combined("[1080p] A – 12").unwrap().episode_label(), "12");
        assert_eq!(combined("[1080p] A – 11.5").unwrap().episode_label(), "11.5");
        assert_eq!(combined("[1080p] A – 13-14").unwrap().episode_label(), "13-14");
    }
}
