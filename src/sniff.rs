use std::io::{Read, Seek};
use std::path::Path;

use log::debug;

use crate::source::{ImageSource, MAX_PREFIX_LEN};
use crate::types::ImageType;

const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

const GIF87A_SIGNATURE: &[u8] = b"GIF87a";
const GIF89A_SIGNATURE: &[u8] = b"GIF89a";

const BMP_SIGNATURE: &[u8] = b"BM";

const TIFF_LE_SIGNATURE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];
const TIFF_BE_SIGNATURE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];

const RIFF_SIGNATURE: &[u8] = b"RIFF";
const WEBP_TAG: &[u8] = b"WEBP";
/// Offset of the `WEBP` tag within a RIFF container. Bytes 4..8 hold the
/// RIFF chunk size and may take any value.
const WEBP_TAG_OFFSET: usize = 8;

const ICO_SIGNATURE: &[u8] = &[0x00, 0x00, 0x01, 0x00];

/// Detects the image type of a source, with an optional prefix override.
///
/// This is the most general entry point; the `detect_*_image_type` helpers
/// cover the common shapes with less ceremony.
///
/// # Arguments
/// * `source` - The input to examine, or `None` when there is nothing to
///   read
/// * `prefix` - When present, used verbatim as the byte prefix; no I/O is
///   performed against `source`
///
/// # Returns
/// The detected [`ImageType`]. Unreadable input (missing file, permission
/// denied, broken stream) is indistinguishable from an unrecognized format:
/// both yield [`ImageType::Unknown`], never an error.
pub fn detect_image_type(source: Option<ImageSource>, prefix: Option<&[u8]>) -> ImageType {
    if let Some(prefix) = prefix {
        let len = prefix.len().min(MAX_PREFIX_LEN);
        return detect_prefix_image_type(&prefix[..len]);
    }

    let mut source = match source {
        Some(source) => source,
        None => return ImageType::Unknown,
    };
    match source.read_prefix() {
        Ok(prefix) => detect_prefix_image_type(&prefix),
        Err(err) => {
            debug!("Read image prefix failed, treat as unknown: {:#}", err);
            ImageType::Unknown
        }
    }
}

/// Detects the image type by examining the file signature (magic numbers)
/// in the prefix bytes.
///
/// Signatures are checked in a fixed order and the first match wins. A
/// prefix shorter than a signature simply fails that check and falls
/// through, so any input is handled, including empty and truncated ones.
///
/// # Arguments
/// * `prefix` - Leading bytes of the image data
///
/// # Returns
/// The detected [`ImageType`]
pub fn detect_prefix_image_type(prefix: &[u8]) -> ImageType {
    if prefix.is_empty() {
        return ImageType::Unknown;
    }

    if prefix.starts_with(JPEG_SIGNATURE) {
        return ImageType::Jpeg;
    }
    if prefix.starts_with(PNG_SIGNATURE) {
        return ImageType::Png;
    }
    if prefix.starts_with(GIF87A_SIGNATURE) || prefix.starts_with(GIF89A_SIGNATURE) {
        return ImageType::Gif;
    }
    if prefix.starts_with(BMP_SIGNATURE) {
        return ImageType::Bmp;
    }
    if prefix.starts_with(TIFF_LE_SIGNATURE) || prefix.starts_with(TIFF_BE_SIGNATURE) {
        return ImageType::Tiff;
    }
    if is_webp_prefix(prefix) {
        return ImageType::Webp;
    }
    if prefix.starts_with(ICO_SIGNATURE) {
        return ImageType::Ico;
    }

    ImageType::Unknown
}

fn is_webp_prefix(prefix: &[u8]) -> bool {
    prefix.len() >= WEBP_TAG_OFFSET + WEBP_TAG.len()
        && prefix.starts_with(RIFF_SIGNATURE)
        && &prefix[WEBP_TAG_OFFSET..WEBP_TAG_OFFSET + WEBP_TAG.len()] == WEBP_TAG
}

/// Detects the image type of raw bytes.
///
/// # Examples
/// ```
/// use imghdr::{detect_data_image_type, ImageType};
///
/// // PNG signature
/// let png_data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
/// assert_eq!(detect_data_image_type(&png_data), ImageType::Png);
///
/// // JPEG signature
/// let jpeg_data = [0xFF, 0xD8, 0xFF, 0x00];
/// assert_eq!(detect_data_image_type(&jpeg_data), ImageType::Jpeg);
/// ```
pub fn detect_data_image_type(data: &[u8]) -> ImageType {
    detect_image_type(Some(ImageSource::Data(data)), None)
}

/// Detects the image type of a file on disk.
///
/// The file is opened read-only, at most [`MAX_PREFIX_LEN`] bytes are read,
/// and the handle is closed before returning. A file that does not exist or
/// cannot be read yields [`ImageType::Unknown`].
pub fn detect_file_image_type<P: AsRef<Path>>(path: P) -> ImageType {
    detect_image_type(Some(ImageSource::File(path.as_ref())), None)
}

/// Detects the image type of an open seekable stream.
///
/// The stream is read from its start and its position is restored before
/// returning, so calling this twice in a row yields the same result and
/// consumes nothing.
pub fn detect_stream_image_type<R: Read + Seek>(stream: &mut R) -> ImageType {
    detect_image_type(Some(ImageSource::Stream(stream)), None)
}

/// Checks if the provided data represents a supported image format.
pub fn is_data_image(data: &[u8]) -> bool {
    detect_data_image_type(data).is_known()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg() {
        assert_eq!(
            detect_data_image_type(&[0xFF, 0xD8, 0xFF]),
            ImageType::Jpeg
        );
        assert_eq!(
            detect_data_image_type(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46]),
            ImageType::Jpeg
        );
        // Truncated signature does not match.
        assert_eq!(detect_data_image_type(&[0xFF, 0xD8]), ImageType::Unknown);
    }

    #[test]
    fn test_png() {
        assert_eq!(
            detect_data_image_type(b"\x89PNG\r\n\x1a\n"),
            ImageType::Png
        );
        assert_eq!(
            detect_data_image_type(b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0D"),
            ImageType::Png
        );
        assert_eq!(detect_data_image_type(b"\x89PNG\r\n"), ImageType::Unknown);
    }

    #[test]
    fn test_gif() {
        assert_eq!(detect_data_image_type(b"GIF87a"), ImageType::Gif);
        assert_eq!(detect_data_image_type(b"GIF89a\x01\x02"), ImageType::Gif);
        assert_eq!(detect_data_image_type(b"GIF88a"), ImageType::Unknown);
    }

    #[test]
    fn test_bmp() {
        assert_eq!(detect_data_image_type(b"BM"), ImageType::Bmp);
        assert_eq!(detect_data_image_type(b"BM\x36\x84\x03\x00"), ImageType::Bmp);
    }

    #[test]
    fn test_tiff() {
        assert_eq!(detect_data_image_type(b"II*\x00"), ImageType::Tiff);
        assert_eq!(detect_data_image_type(b"MM\x00*"), ImageType::Tiff);
        assert_eq!(
            detect_data_image_type(b"II*\x00\x08\x00\x00\x00"),
            ImageType::Tiff
        );
        // Wrong byte-order marker pairings do not match.
        assert_eq!(detect_data_image_type(b"II\x00*"), ImageType::Unknown);
        assert_eq!(detect_data_image_type(b"MM*\x00"), ImageType::Unknown);
    }

    #[test]
    fn test_webp() {
        assert_eq!(
            detect_data_image_type(b"RIFF\x24\x00\x00\x00WEBPVP8 "),
            ImageType::Webp
        );
        // The chunk-size field (bytes 4..8) is ignored, any value matches.
        assert_eq!(
            detect_data_image_type(b"RIFF\x00\x00\x00\x00WEBP"),
            ImageType::Webp
        );
        assert_eq!(
            detect_data_image_type(b"RIFF\xFF\xFF\xFF\xFFWEBP"),
            ImageType::Webp
        );
        // RIFF containers that are not WebP do not match.
        assert_eq!(
            detect_data_image_type(b"RIFF\x24\x00\x00\x00WAVE"),
            ImageType::Unknown
        );
        // Too short to carry the WEBP tag.
        assert_eq!(detect_data_image_type(b"RIFF\x24\x00"), ImageType::Unknown);
    }

    #[test]
    fn test_ico() {
        assert_eq!(
            detect_data_image_type(&[0x00, 0x00, 0x01, 0x00]),
            ImageType::Ico
        );
        assert_eq!(
            detect_data_image_type(&[0x00, 0x00, 0x01, 0x00, 0x01, 0x00]),
            ImageType::Ico
        );
        assert_eq!(
            detect_data_image_type(&[0x00, 0x00, 0x02, 0x00]),
            ImageType::Unknown
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(detect_data_image_type(&[]), ImageType::Unknown);
        assert_eq!(detect_data_image_type(&[0x00]), ImageType::Unknown);
        assert_eq!(detect_data_image_type(&[0xFF]), ImageType::Unknown);
        assert_eq!(
            detect_data_image_type(&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]),
            ImageType::Unknown
        );
        assert_eq!(detect_data_image_type(b"Hello, World!"), ImageType::Unknown);
    }

    #[test]
    fn test_prefix_override() {
        let mut data: &[u8] = b"GIF89a trailing";
        // The explicit prefix wins over the source.
        let detected = detect_image_type(
            Some(ImageSource::RawStream(&mut data)),
            Some(b"\x89PNG\r\n\x1a\n"),
        );
        assert_eq!(detected, ImageType::Png);
    }

    #[test]
    fn test_absent_input() {
        assert_eq!(detect_image_type(None, None), ImageType::Unknown);
        assert_eq!(detect_image_type(None, Some(b"")), ImageType::Unknown);
        assert_eq!(detect_image_type(None, Some(b"BM")), ImageType::Bmp);
    }

    #[test]
    fn test_is_data_image() {
        assert!(is_data_image(b"\x89PNG\r\n\x1a\n\x00"));
        assert!(is_data_image(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(is_data_image(b"GIF87a"));
        assert!(!is_data_image(&[0x00, 0x01, 0x02, 0x03]));
        assert!(!is_data_image(&[]));
    }
}
