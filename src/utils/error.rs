//! Error handling for the drive icon randomizer

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the drive icon randomizer
#[derive(Debug, Error)]
pub enum RandomizerError {
    #[error("Failed to decode image {path:?}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Failed to encode icon: {0}")]
    Encode(String),

    #[error("IO error on {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("{0}")]
    Usage(String),

    #[error("Environment error: {0}")]
    Environment(String),
}

impl RandomizerError {
    /// Wrap an IO error with the path it happened on
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RandomizerError::File {
            path: path.into(),
            source,
        }
    }

    /// Usage errors are reported once and nothing is mutated
    pub fn is_usage(&self) -> bool {
        matches!(self, RandomizerError::Usage(_))
    }
}

pub type Result<T> = std::result::Result<T, RandomizerError>;
