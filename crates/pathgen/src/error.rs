use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathGenError {
    #[error("Invalid path component: {0:?}")]
    InvalidComponent(String),
}

pub type Result<T> = std::result::Result<T, PathGenError>;
