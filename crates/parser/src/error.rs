use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing [quality] prefix in title: {0}")]
    MissingQuality(String),

    #[error("missing name/episode separator in title: {0}")]
    MissingSeparator(String),

    #[error("empty anime name in title: {0}")]
    EmptyName(String),

    #[error("missing episode token")]
    EmptyEpisode,

    #[error("invalid episode token: {0}")]
    InvalidEpisode(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;
