use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LingodirError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Input directory does not exist: {}", .0.display())]
    DirectoryMissing(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid file name: {0}")]
    Naming(String),

    #[error("Completion service error: {0}")]
    Service(String),

    #[error("Invalid response from completion service: {0}")]
    InvalidResponse(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LingodirError {
    /// Errors that must stop the whole run instead of skipping one unit of work.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DirectoryMissing(_) | Self::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, LingodirError>;
