//! Test utilities and fixtures for nowplaying tests.
//!
//! Provides a builder for synthetic ID3v2 tags and a few tiny image
//! fixtures, so tests don't need binary MP3 files checked in.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::TagBuilder;
//!
//! let bytes = TagBuilder::new()
//!     .text(*b"TIT2", "Smooth Operator")
//!     .text(*b"TPE1", "Sade")
//!     .padding(128)
//!     .build();
//! ```

/// Builds an ID3v2.3 tag byte by byte.
#[derive(Debug, Default)]
pub struct TagBuilder {
    frames: Vec<u8>,
    padding: usize,
}

impl TagBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode one complete frame: id, big-endian size, two flag bytes, payload.
    pub fn frame_bytes(id: [u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(10 + payload.len());
        bytes.extend_from_slice(&id);
        bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&[0, 0]);
        bytes.extend_from_slice(payload);
        bytes
    }

    /// Append a frame with an arbitrary payload.
    pub fn frame(mut self, id: [u8; 4], payload: &[u8]) -> Self {
        self.frames.extend_from_slice(&Self::frame_bytes(id, payload));
        self
    }

    /// Append only a frame header claiming `size` bytes, without a payload.
    pub fn frame_header(mut self, id: [u8; 4], size: u32) -> Self {
        self.frames.extend_from_slice(&id);
        self.frames.extend_from_slice(&size.to_be_bytes());
        self.frames.extend_from_slice(&[0, 0]);
        self
    }

    /// Append a Latin-1 text frame with a trailing NUL.
    pub fn text(self, id: [u8; 4], text: &str) -> Self {
        let mut payload = vec![0u8];
        payload.extend_from_slice(text.as_bytes());
        payload.push(0);
        self.frame(id, &payload)
    }

    /// Zero bytes appended after the frames, counted in the tag size.
    pub fn padding(mut self, len: usize) -> Self {
        self.padding = len;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let size = (self.frames.len() + self.padding) as u32;
        let mut bytes = b"ID3\x03\x00\x00".to_vec();
        bytes.extend_from_slice(&encode_synchsafe(size));
        bytes.extend_from_slice(&self.frames);
        bytes.resize(bytes.len() + self.padding, 0);
        bytes
    }
}

/// APIC payload: encoding, MIME, NUL, picture type, description, NUL, data.
pub fn picture_payload(mime: &str, picture_type: u8, description: &str, data: &[u8]) -> Vec<u8> {
    let mut payload = vec![0u8];
    payload.extend_from_slice(mime.as_bytes());
    payload.push(0);
    payload.push(picture_type);
    payload.extend_from_slice(description.as_bytes());
    payload.push(0);
    payload.extend_from_slice(data);
    payload
}

/// Inverse of [`crate::id3::decode_synchsafe`] for values below 2^28.
pub fn encode_synchsafe(n: u32) -> [u8; 4] {
    [
        ((n >> 21) & 0x7f) as u8,
        ((n >> 14) & 0x7f) as u8,
        ((n >> 7) & 0x7f) as u8,
        (n & 0x7f) as u8,
    ]
}

/// Bytes starting with a JPEG SOI/APP0 marker.
pub fn sample_jpeg() -> Vec<u8> {
    vec![
        0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0xff,
        0xd9,
    ]
}

/// Bytes starting with the PNG signature.
pub fn sample_png() -> Vec<u8> {
    vec![
        0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, b'I', b'H', b'D',
        b'R',
    ]
}

/// A complete tagged "MP3": title, artist, JPEG cover, padding and a few
/// bytes of fake audio after the tag.
pub fn sample_mp3() -> Vec<u8> {
    let mut bytes = TagBuilder::new()
        .text(*b"TIT2", "Smooth Operator")
        .text(*b"TPE1", "Sade")
        .frame(
            *b"APIC",
            &picture_payload("image/jpeg", 3, "Front cover", &sample_jpeg()),
        )
        .padding(64)
        .build();
    bytes.extend_from_slice(&[0xff, 0xfb, 0x90, 0x64, 0x00, 0x00, 0x00, 0x00]);
    bytes
}
