//! Typed errors for repository operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the post repository and codec
#[derive(Debug, Error)]
pub enum WriterError {
    /// No post matched the given title in the target directory
    #[error("post not found: {title}")]
    NotFound { title: String },

    /// A different file already uses an equivalent title
    #[error("a post titled \"{title}\" already exists at {existing:?}")]
    DuplicateTitle { title: String, existing: PathBuf },

    /// The document opens a front-matter header that cannot be parsed
    #[error("malformed front matter in {path:?}: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },

    /// Filesystem failure (permissions, disk full, missing directory)
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required field was missing or empty before a save
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl WriterError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the repository layer
pub type Result<T> = std::result::Result<T, WriterError>;
