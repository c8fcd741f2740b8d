// src/error.rs

//! Error types for slackconv

use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Package could not be opened or scanned
    #[error("initialization error: {0}")]
    InitError(String),

    /// Malformed input (file names, archive entries, options)
    #[error("parse error: {0}")]
    ParseError(String),

    /// Filesystem operation failed
    #[error("IO error: {0}")]
    IoError(String),

    /// A requested file or member does not exist
    #[error("not found: {0}")]
    NotFoundError(String),

    /// Package name cannot be used as a slack-desc line tag
    #[error("invalid package name '{0}': must be non-empty and must not contain ':'")]
    InvalidName(String),

    /// An external tool could not be spawned or exited unsuccessfully
    #[error("{tool} {} failed: {reason}", .args.join(" "))]
    ToolFailed {
        tool: String,
        args: Vec<String>,
        reason: String,
    },

    /// Conversion options file could not be read or parsed
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}
