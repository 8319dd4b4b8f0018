use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the recommendation engine
#[derive(Error, Debug)]
pub enum BookEngineError {
    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot could not be loaded
    #[error("Snapshot '{}' error: {message}", path.display())]
    Snapshot { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for BookEngineError {
    fn from(s: String) -> Self {
        BookEngineError::Other(s)
    }
}

impl From<&str> for BookEngineError {
    fn from(s: &str) -> Self {
        BookEngineError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BookEngineError>;
