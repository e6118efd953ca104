//! Frame table walk and per-frame payload decoding.

use super::Picture;
use super::header::{HEADER_LEN, TagHeader};

pub(crate) const TITLE: [u8; 4] = *b"TIT2";
pub(crate) const ARTIST: [u8; 4] = *b"TPE1";
pub(crate) const PICTURE: [u8; 4] = *b"APIC";

/// MIME type used when an APIC frame carries an empty MIME string.
pub const DEFAULT_PICTURE_MIME: &str = "image/jpeg";

/// Text encoding marker for ISO-8859-1.
const ENCODING_LATIN1: u8 = 0;

/// One length-prefixed frame inside the tag.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame<'a> {
    pub id: [u8; 4],
    pub declared_size: u32,
    pub payload: &'a [u8],
}

impl Frame<'_> {
    /// Frame identifier as text, for logging.
    pub fn id_str(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }
}

/// Sequential walk over the frames of a tag.
///
/// Ends at the tag boundary, at the end of the buffer, or at the first
/// zero-size, oversize or truncated frame. Ending early is not an error:
/// the frames already yielded stay valid.
pub(crate) struct Frames<'a> {
    buf: &'a [u8],
    offset: usize,
    end: usize,
    declared_size: u32,
    done: bool,
}

impl<'a> Frames<'a> {
    pub fn new(buf: &'a [u8], header: &TagHeader) -> Self {
        Self {
            buf,
            offset: HEADER_LEN,
            end: header.end(),
            declared_size: header.declared_size,
            done: false,
        }
    }

    fn stop(&mut self) -> Option<Frame<'a>> {
        self.done = true;
        None
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Frame<'a>> {
        if self.done || self.offset >= self.end {
            return None;
        }

        let Some(head) = self.buf.get(self.offset..self.offset + HEADER_LEN) else {
            return self.stop();
        };

        let id = [head[0], head[1], head[2], head[3]];
        let declared_size = u32::from_be_bytes([head[4], head[5], head[6], head[7]]);

        if declared_size == 0 || declared_size > self.declared_size {
            tracing::debug!(
                offset = self.offset,
                frame_size = declared_size,
                "End of frame table"
            );
            return self.stop();
        }

        let start = self.offset + HEADER_LEN;
        let Some(payload) = self.buf.get(start..start + declared_size as usize) else {
            tracing::debug!(
                offset = self.offset,
                frame_size = declared_size,
                available = self.buf.len().saturating_sub(start),
                "Frame truncated by end of buffer"
            );
            return self.stop();
        };

        self.offset = start + declared_size as usize;

        Some(Frame {
            id,
            declared_size,
            payload,
        })
    }
}

/// Decode a text frame (TIT2, TPE1, ...).
///
/// The first byte is the encoding marker. The rest is read as UTF-8,
/// falling back to ISO-8859-1 for Latin-1 frames that are not valid UTF-8.
/// NUL padding is removed and whitespace trimmed.
pub(crate) fn decode_text(payload: &[u8]) -> String {
    let Some((&encoding, text)) = payload.split_first() else {
        return String::new();
    };

    let decoded = match std::str::from_utf8(text) {
        Ok(s) => s.to_string(),
        Err(_) if encoding == ENCODING_LATIN1 => text.iter().map(|&b| char::from(b)).collect(),
        Err(_) => String::from_utf8_lossy(text).into_owned(),
    };

    decoded.replace('\0', "").trim().to_string()
}

/// Decode an attached picture frame.
///
/// Layout: encoding byte, NUL-terminated MIME string, picture type byte,
/// NUL-terminated description, image data. Returns `None` when either
/// string is missing its terminator.
pub(crate) fn decode_picture(payload: &[u8]) -> Option<Picture> {
    let rest = payload.get(1..)?;

    let mime_end = rest.iter().position(|&b| b == 0)?;
    let mime = String::from_utf8_lossy(&rest[..mime_end]).trim().to_string();

    // Picture type byte sits between the two strings and may itself be 0.
    let description = rest.get(mime_end + 2..)?;
    let description_end = description.iter().position(|&b| b == 0)?;
    let data = &description[description_end + 1..];

    Some(Picture {
        data: data.to_vec(),
        mime_type: if mime.is_empty() {
            DEFAULT_PICTURE_MIME.to_string()
        } else {
            mime
        },
    })
}
