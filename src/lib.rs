//! nowplaying - title, artist and cover art for a now-playing card.
//!
//! The core is [`id3::extract`], a small best-effort ID3v2 reader that turns
//! the first bytes of an MP3 file into an [`id3::ExtractedTags`] value. The
//! other modules are the layer around it: fetching bytes from files or URLs,
//! falling back to default display values, and turning embedded pictures
//! into data URIs or image files.

pub mod cli;
pub mod config;
pub mod cover;
pub mod display;
pub mod error;
pub mod id3;
pub mod scanner;
pub mod source;
#[cfg(test)]
pub(crate) mod test_utils;

pub use display::NowPlaying;
pub use id3::{ExtractedTags, Picture, extract};
