//! Byte acquisition for tag extraction.
//!
//! Tags live at the start of the file, so sources are usually read as a
//! prefix. [`fetch_tag_bytes`] reads the configured prefix and, when the tag
//! declares itself longer (a large embedded cover), reads again up to the
//! full tag length.
//!
//! The [`ByteSource`] trait lets tests substitute an in-memory source.

mod file;
mod http;

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::FetchConfig;
use crate::error::Result;
use crate::id3;

pub use file::{FileFetcher, read_prefix};
pub use http::HttpFetcher;

/// Where the audio bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Local file
    File(PathBuf),
    /// HTTP(S) URL
    Url(String),
}

impl Source {
    /// Interpret a command-line argument: URLs by scheme, anything else is a path.
    pub fn parse(input: &str) -> Self {
        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(input.to_string())
        } else {
            Self::File(PathBuf::from(input))
        }
    }

    /// Short name for output file stems and messages.
    pub fn stem(&self) -> String {
        let stem = match self {
            Self::File(path) => path.file_stem().map(|s| s.to_string_lossy().into_owned()),
            Self::Url(url) => {
                let rest = url.split_once("://").map_or(url.as_str(), |(_, rest)| rest);
                let rest = rest.split(['?', '#']).next().unwrap_or_default();
                rest.split_once('/')
                    .and_then(|(_, path)| path.trim_end_matches('/').rsplit('/').next())
                    .map(|name| name.rsplit_once('.').map_or(name, |(stem, _)| stem).to_string())
            }
        };
        stem.filter(|s| !s.is_empty())
            .unwrap_or_else(|| "cover".to_string())
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Anything that can hand back raw bytes for a source.
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Fetch the bytes of `source`, at most `limit` of them when set.
    async fn fetch(&self, source: &Source, limit: Option<usize>) -> Result<Vec<u8>>;
}

/// Reads files from disk and URLs over HTTP.
pub struct DefaultSource {
    file: FileFetcher,
    http: HttpFetcher,
}

impl DefaultSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            file: FileFetcher,
            http: HttpFetcher::new(config)?,
        })
    }
}

#[async_trait]
impl ByteSource for DefaultSource {
    async fn fetch(&self, source: &Source, limit: Option<usize>) -> Result<Vec<u8>> {
        match source {
            Source::File(path) => self.file.fetch(path, limit).await,
            Source::Url(url) => self.http.fetch(url, limit).await,
        }
    }
}

/// Fetch enough of `source` to cover its whole ID3v2 tag.
pub async fn fetch_tag_bytes<S>(
    fetcher: &S,
    source: &Source,
    config: &FetchConfig,
) -> Result<Vec<u8>>
where
    S: ByteSource + ?Sized,
{
    let bytes = fetcher.fetch(source, Some(initial_len(config))).await?;

    match refetch_len(&bytes, config) {
        Some(limit) => {
            tracing::debug!(source = %source, limit, "Prefix too short for tag, fetching more");
            fetcher.fetch(source, Some(limit)).await
        }
        None => Ok(bytes),
    }
}

/// Size of the first read: `prefix_bytes`, but never less than a tag header.
pub fn initial_len(config: &FetchConfig) -> usize {
    config.prefix_bytes.max(id3::HEADER_LEN)
}

/// How many bytes to read again when `prefix` holds only part of a tag.
///
/// `None` when the prefix already has the whole tag, has no tag, or is
/// shorter than requested (the source ended). Capped at `max_tag_bytes`.
pub fn refetch_len(prefix: &[u8], config: &FetchConfig) -> Option<usize> {
    if prefix.len() < initial_len(config) {
        return None;
    }

    let needed = id3::tag_len(prefix)?;
    if needed <= prefix.len() {
        return None;
    }

    let limit = needed.min(config.max_tag_bytes);
    if limit <= prefix.len() {
        tracing::warn!(
            tag_bytes = needed,
            max = config.max_tag_bytes,
            "Tag larger than max_tag_bytes, reading a truncated tag"
        );
        return None;
    }

    Some(limit)
}
