//! Release title parsing and episode matching.
//!
//! Feed providers publish episode titles in different dialects. This crate turns a raw
//! title into a [`ParsedTitle`] and decides how it relates to the episode a tracked
//! release is waiting for.
//!
//! # Example
//!
//! ```
//! use parser::{match_episode, MatchOutcome, RawTitle, TitleParser};
//!
//! let parsed = TitleParser::new()
//!     .parse(RawTitle::Combined("[1080p] Show Name – 12"))
//!     .unwrap();
//!
//! assert_eq!(parsed.anime_name, "Show Name");
//! assert_eq!(match_episode("Show", 12, &parsed), MatchOutcome::Normal);
//! ```

mod error;
mod matcher;
mod models;
mod parser;

pub use error::{ParseError, Result};
pub use matcher::{match_episode, MatchOutcome};
pub use models::{EpisodeToken, ParsedTitle, RawTitle};
pub use parser::{parse_episode_field, TitleParser};
