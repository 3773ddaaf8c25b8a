//! Error types for zipsh.
//!
//! `Archive` and `Config` only occur at startup and are fatal; every other
//! variant is recoverable: the shell prints one line and returns to the
//! prompt with session state unchanged.

use std::io;

/// Errors produced by the zipsh crates.
#[derive(Debug, thiserror::Error)]
pub enum ZipshError {
    /// The archive container could not be opened or enumerated.
    #[error("archive error: {0}")]
    Archive(String),

    /// The configuration file is missing or malformed.
    #[error("config error: {0}")]
    Config(String),

    /// A path did not resolve to any node in the index.
    #[error("no such file or directory: {0}")]
    NotFound(String),

    /// A directory operation was applied to a file node.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// A file operation was applied to a directory node.
    #[error("is a directory: {0}")]
    IsADirectory(String),

    /// A command was invoked with the wrong number of arguments.
    #[error("usage: {0}")]
    Usage(String),

    /// Writing extracted bytes to the host filesystem failed.
    #[error("host write failed: {0}")]
    HostWrite(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ZipshError {
    /// Whether this error is fatal at startup (as opposed to a recoverable
    /// command failure reported at the prompt).
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Archive(_) | Self::Config(_))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ZipshError>;
