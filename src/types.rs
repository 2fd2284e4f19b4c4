use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents the type of an image file.
///
/// The serialized form of each variant is its canonical lowercase name, so
/// the enum can be embedded directly in API payloads or config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    /// JPEG image format
    Jpeg,
    /// PNG image format
    Png,
    /// GIF image format, both 87a and 89a
    Gif,
    /// Windows bitmap format
    Bmp,
    /// TIFF image format, both byte orders
    Tiff,
    /// WebP image format
    Webp,
    /// Windows icon format
    Ico,
    /// Unknown or unsupported image format
    Unknown,
}

impl ImageType {
    /// Returns the canonical lowercase name of the image type.
    pub fn name(&self) -> &'static str {
        match self {
            ImageType::Jpeg => "jpeg",
            ImageType::Png => "png",
            ImageType::Gif => "gif",
            ImageType::Bmp => "bmp",
            ImageType::Tiff => "tiff",
            ImageType::Webp => "webp",
            ImageType::Ico => "ico",
            ImageType::Unknown => "unknown",
        }
    }

    /// Returns the conventional file extension, without the leading dot.
    ///
    /// `None` for [`ImageType::Unknown`].
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ImageType::Jpeg => Some("jpg"),
            ImageType::Png => Some("png"),
            ImageType::Gif => Some("gif"),
            ImageType::Bmp => Some("bmp"),
            ImageType::Tiff => Some("tiff"),
            ImageType::Webp => Some("webp"),
            ImageType::Ico => Some("ico"),
            ImageType::Unknown => None,
        }
    }

    /// Get MIME type string.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageType::Jpeg => "image/jpeg",
            ImageType::Png => "image/png",
            ImageType::Gif => "image/gif",
            ImageType::Bmp => "image/bmp",
            ImageType::Tiff => "image/tiff",
            ImageType::Webp => "image/webp",
            ImageType::Ico => "image/vnd.microsoft.icon",
            ImageType::Unknown => "application/octet-stream",
        }
    }

    /// Check if this is a recognized image format.
    pub fn is_known(&self) -> bool {
        !matches!(self, ImageType::Unknown)
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
