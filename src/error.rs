//! Application-wide error types.
//!
//! Tag extraction itself never fails (see [`crate::id3`]); errors only come
//! from the caller layer around it: fetching bytes, writing cover files and
//! reading configuration. Library modules return [`Error`], the CLI wraps
//! everything in `anyhow`.
//!
//! # Example
//!
//! ```ignore
//! use nowplaying::error::{Error, Result, ResultExt};
//!
//! fn load(path: &Path) -> Result<Vec<u8>> {
//!     std::fs::read(path).with_context(format!("reading {}", path.display()))
//! }
//! ```

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP fetch failed or returned a non-success status
    #[error("Fetch error for {url}: {message}")]
    Fetch { url: String, message: String },

    /// File not found
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// The source has no embedded cover picture
    #[error("No embedded cover art in {0}")]
    NoCover(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a fetch error.
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create a no-cover error.
    pub fn no_cover(source: impl Into<String>) -> Self {
        Self::NoCover(source.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, reqwest::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let url = e.url().map(|u| u.to_string()).unwrap_or_default();
            Error::fetch(url, e.to_string()).context(ctx)
        })
    }
}
