//! ID3v2 tag header: signature check and synchsafe size decoding.
//!
//! Layout of the 10-byte header:
//!
//! ```text
//! "ID3" | major | revision | flags | size (4 bytes, synchsafe)
//! ```

/// Length of the tag header and of every frame header.
pub(crate) const HEADER_LEN: usize = 10;

const SIGNATURE: &[u8; 3] = b"ID3";

/// Parsed tag header. Never exposed; it only bounds the frame walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TagHeader {
    pub major_version: u8,
    pub revision: u8,
    pub flags: u8,
    /// Bytes of tag data following the header, excluding the header itself.
    pub declared_size: u32,
}

impl TagHeader {
    /// Parse the header at the start of `buf`.
    ///
    /// Returns `None` for buffers shorter than a header or not starting
    /// with the `ID3` signature.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        let header = buf.get(..HEADER_LEN)?;
        if !has_tag(header) {
            return None;
        }

        Some(Self {
            major_version: header[3],
            revision: header[4],
            flags: header[5],
            declared_size: decode_synchsafe([header[6], header[7], header[8], header[9]]),
        })
    }

    /// Offset one past the last byte of tag data.
    pub fn end(&self) -> usize {
        HEADER_LEN + self.declared_size as usize
    }
}

/// Check whether `buf` starts with an ID3v2 signature.
pub fn has_tag(buf: &[u8]) -> bool {
    buf.starts_with(SIGNATURE)
}

/// Decode a synchsafe integer: 4 groups of 7 bits, big-endian.
///
/// The high bit of each byte is ignored, so `[0x00, 0x00, 0x02, 0x01]`
/// decodes to 257, not the 513 a plain big-endian read would give.
pub fn decode_synchsafe(bytes: [u8; 4]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 7) | u32::from(b & 0x7f))
}
