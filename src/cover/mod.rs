//! Cover art ready for display.
//!
//! Turns the raw picture found in a tag into something a presentation layer
//! can show:
//!
//! 1. **Data URI** - `data:image/jpeg;base64,...`, embeddable anywhere
//! 2. **File on disk** - `{stem}.jpg` / `{stem}.png` next to other assets
//!
//! Whatever is produced belongs to the caller, including deleting a written
//! file once it is no longer shown.

mod embedded;
mod store;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

pub use embedded::cover_from_picture;
pub use store::write_cover;

/// Cover art data ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    /// Raw image data
    pub data: Vec<u8>,
    /// MIME type (image/jpeg, image/png, ...)
    pub mime_type: String,
}

impl CoverArt {
    /// Encode as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            "image/webp" => "webp",
            "image/tiff" => "tif",
            _ => "jpg",
        }
    }

    /// SHA256 of the image bytes as lowercase hex.
    ///
    /// Albums share covers; the hash identifies identical images.
    pub fn content_hash(&self) -> String {
        format!("{:x}", Sha256::digest(&self.data))
    }

    /// Image size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
