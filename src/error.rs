//! Errors raised by the content pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for pipeline operations
pub type Result<T, E = BlogError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum BlogError {
    /// The posts directory or a requested post does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A file or directory listing could not be read
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A front-matter block was opened but never closed, or is not a YAML mapping
    #[error("Malformed front-matter: {0}")]
    MalformedFrontMatter(String),

    /// The markdown render task could not complete
    #[error("Render error: {0}")]
    Render(String),
}

impl BlogError {
    /// Whether this error means "nothing here" rather than a broken site
    pub fn is_not_found(&self) -> bool {
        matches!(self, BlogError::NotFound(_))
    }
}
