//! ID3v2 tag extraction for the now-playing card.
//!
//! A small, self-contained reader that pulls the title (`TIT2`), artist
//! (`TPE1`) and attached picture (`APIC`) out of the ID3v2 tag at the start
//! of an MP3 byte stream. It works on a full file or on any prefix of one.
//!
//! # Behavior on bad input
//!
//! Extraction never fails. Malformed input degrades locally:
//! - no `ID3` signature: empty result
//! - zero-size, oversize or truncated frame: scan stops, partial result
//! - APIC without its two NUL terminators: that frame is skipped
//!
//! Only ISO-8859-1 and UTF-8 text is handled; UTF-16 frames, extended
//! headers, footers and ID3v1 are not.
//!
//! # Example
//!
//! ```ignore
//! let bytes = std::fs::read("song.mp3")?;
//! let tags = nowplaying::id3::extract(&bytes);
//! println!("{}", tags.title.as_deref().unwrap_or("Unknown Title"));
//! ```

mod frame;
mod header;

use serde::{Serialize, Serializer};

use frame::{ARTIST, Frames, PICTURE, TITLE, decode_picture, decode_text};
use header::TagHeader;
pub(crate) use header::HEADER_LEN;

pub use frame::DEFAULT_PICTURE_MIME;
pub use header::{decode_synchsafe, has_tag};

/// Tags found in a buffer. Every field is optional; an all-`None` value
/// means the buffer had no usable ID3v2 tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub picture: Option<Picture>,
}

impl ExtractedTags {
    /// True when no title, artist or picture was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.picture.is_none()
    }
}

/// Embedded picture from an `APIC` frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Picture {
    /// Raw image bytes as stored in the tag.
    #[serde(rename = "size", serialize_with = "serialize_len")]
    pub data: Vec<u8>,
    /// MIME type declared by the frame (e.g. "image/jpeg").
    pub mime_type: String,
}

fn serialize_len<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(data.len() as u64)
}

/// Extract title, artist and picture from the ID3v2 tag at the start of `buf`.
///
/// Pure function of its input: calling it twice on the same bytes gives
/// equal results. When a frame id occurs more than once, the last one wins.
pub fn extract(buf: &[u8]) -> ExtractedTags {
    let mut tags = ExtractedTags::default();

    let Some(header) = TagHeader::parse(buf) else {
        return tags;
    };

    tracing::trace!(
        version = header.major_version,
        revision = header.revision,
        flags = header.flags,
        size = header.declared_size,
        "Found ID3v2 header"
    );

    for frame in Frames::new(buf, &header) {
        match frame.id {
            TITLE => tags.title = Some(decode_text(frame.payload)),
            ARTIST => tags.artist = Some(decode_text(frame.payload)),
            PICTURE => match decode_picture(frame.payload) {
                Some(picture) => tags.picture = Some(picture),
                None => tracing::debug!(
                    frame = %frame.id_str(),
                    size = frame.declared_size,
                    "Skipping malformed attached picture"
                ),
            },
            _ => {}
        }
    }

    tags
}

/// Total length of the tag (header plus declared size), if `buf` has one.
///
/// Lets a caller that fetched only a prefix know how many bytes the
/// complete tag needs.
pub fn tag_len(buf: &[u8]) -> Option<usize> {
    TagHeader::parse(buf).map(|header| header.end())
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_utils::{TagBuilder, encode_synchsafe};
    use proptest::prelude::*;

    /// Frame text without NULs or surrounding whitespace
    fn frame_text() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z0-9][a-zA-Z0-9 '&.-]{0,30}[a-zA-Z0-9]")
            .unwrap()
    }

    proptest! {
        /// Arbitrary bytes never panic
        #[test]
        fn extract_never_panics(buf in prop::collection::vec(any::<u8>(), 0..512)) {
            let _ = extract(&buf);
        }

        /// Arbitrary frame tables behind a valid header never panic
        #[test]
        fn extract_never_panics_with_header(
            body in prop::collection::vec(any::<u8>(), 0..512),
            size in 0u32..1024,
        ) {
            let mut buf = b"ID3\x03\x00\x00".to_vec();
            buf.extend_from_slice(&encode_synchsafe(size));
            buf.extend_from_slice(&body);
            let _ = extract(&buf);
        }

        /// Buffers without the signature always give an empty result
        #[test]
        fn non_id3_is_empty(buf in prop::collection::vec(any::<u8>(), 0..64)) {
            prop_assume!(!buf.starts_with(b"ID3"));
            prop_assert!(extract(&buf).is_empty());
        }

        /// Synchsafe encoding round-trips for every 28-bit value
        #[test]
        fn synchsafe_roundtrip(n in 0u32..(1 << 28)) {
            prop_assert_eq!(decode_synchsafe(encode_synchsafe(n)), n);
        }

        /// Any prefix of a valid tag gives a subset of the full result
        #[test]
        fn prefix_is_subset(title in frame_text(), artist in frame_text(), cut in 0usize..80) {
            let buf = TagBuilder::new()
                .text(frame::TITLE, &title)
                .text(frame::ARTIST, &artist)
                .build();
            let prefix = &buf[..cut.min(buf.len())];
            let tags = extract(prefix);
            if let Some(t) = tags.title {
                prop_assert_eq!(t, title);
            }
            if let Some(a) = tags.artist {
                prop_assert_eq!(a, artist);
            }
        }

        /// Text written by the builder reads back unchanged
        #[test]
        fn text_frames_read_back(title in frame_text(), artist in frame_text()) {
            let buf = TagBuilder::new()
                .text(frame::TITLE, &title)
                .text(frame::ARTIST, &artist)
                .build();
            let tags = extract(&buf);
            prop_assert_eq!(tags.title, Some(title));
            prop_assert_eq!(tags.artist, Some(artist));
        }
    }
}
