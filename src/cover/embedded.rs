//! Convert a picture found in an ID3v2 tag into display-ready cover art.
//!
//! The MIME string in an APIC frame is whatever the tagger wrote: ID3v2.2
//! style "JPG"/"PNG", "image/jpg", or a type that doesn't match the data at
//! all. The bytes themselves are the more reliable source.

use image::ImageFormat;

use super::CoverArt;
use crate::id3::Picture;

/// Build cover art from an extracted picture.
///
/// The MIME type is taken from the image's magic bytes when recognizable,
/// then from the declared type, then `default_mime`. Returns `None` for an
/// empty picture.
pub fn cover_from_picture(picture: &Picture, default_mime: &str) -> Option<CoverArt> {
    if picture.data.is_empty() {
        return None;
    }

    let mime_type = sniff_mime(&picture.data)
        .map(str::to_string)
        .or_else(|| normalize_mime(&picture.mime_type))
        .unwrap_or_else(|| default_mime.to_string());

    if mime_type != picture.mime_type {
        tracing::debug!(
            declared = %picture.mime_type,
            resolved = %mime_type,
            "Cover MIME type differs from tag"
        );
    }

    Some(CoverArt {
        data: picture.data.clone(),
        mime_type,
    })
}

fn sniff_mime(data: &[u8]) -> Option<&'static str> {
    match image::guess_format(data).ok()? {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::Bmp => Some("image/bmp"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Tiff => Some("image/tiff"),
        _ => None,
    }
}

fn normalize_mime(declared: &str) -> Option<String> {
    let declared = declared.trim().to_ascii_lowercase();
    match declared.as_str() {
        "jpg" | "jpeg" | "image/jpg" | "image/pjpeg" => Some("image/jpeg".to_string()),
        "png" => Some("image/png".to_string()),
        "gif" => Some("image/gif".to_string()),
        "bmp" => Some("image/bmp".to_string()),
        s if s.starts_with("image/") => Some(declared),
        _ => None,
    }
}
