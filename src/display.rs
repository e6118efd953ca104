//! What the now-playing card shows.
//!
//! Merges extracted tags with the configured fallbacks. Missing or blank
//! fields get the fallback; a picture becomes [`CoverArt`].

use std::fmt;

use serde::Serialize;

use crate::config::DisplayConfig;
use crate::cover::{CoverArt, cover_from_picture};
use crate::id3::ExtractedTags;

/// Title, artist and optional cover for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub cover: Option<CoverArt>,
}

impl NowPlaying {
    /// Resolve display values from extracted tags.
    pub fn resolve(tags: ExtractedTags, fallback: &DisplayConfig) -> Self {
        let cover = tags
            .picture
            .as_ref()
            .and_then(|p| cover_from_picture(p, &fallback.default_mime));

        Self {
            title: non_blank(tags.title).unwrap_or_else(|| fallback.fallback_title.clone()),
            artist: non_blank(tags.artist).unwrap_or_else(|| fallback.fallback_artist.clone()),
            cover,
        }
    }

    /// Fallback values only, for when the source couldn't be read at all.
    pub fn placeholder(fallback: &DisplayConfig) -> Self {
        Self::resolve(ExtractedTags::default(), fallback)
    }

    /// Summary suitable for JSON output.
    pub fn summary(&self) -> NowPlayingSummary<'_> {
        NowPlayingSummary {
            title: &self.title,
            artist: &self.artist,
            cover_mime: self.cover.as_ref().map(|c| c.mime_type.as_str()),
            cover_bytes: self.cover.as_ref().map(CoverArt::len),
        }
    }
}

impl fmt::Display for NowPlaying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// Serializable view of [`NowPlaying`] without the image bytes.
#[derive(Debug, Serialize)]
pub struct NowPlayingSummary<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub cover_mime: Option<&'a str>,
    pub cover_bytes: Option<usize>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
