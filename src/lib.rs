//! Detect the type of an image by examining its magic-byte signature.
//!
//! Only a small prefix of the input is ever inspected (at most
//! [`MAX_PREFIX_LEN`] bytes), so images are classified without decoding
//! them. Input can be raw bytes, a file path, or an open stream; unreadable
//! input is reported as [`ImageType::Unknown`] rather than an error.
//!
//! ```
//! use imghdr::{detect_data_image_type, ImageType};
//!
//! let data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
//! assert_eq!(detect_data_image_type(&data), ImageType::Png);
//! assert_eq!(detect_data_image_type(&data).name(), "png");
//! ```

pub mod sniff;
pub mod source;
pub mod types;

pub use sniff::{
    detect_data_image_type, detect_file_image_type, detect_image_type,
    detect_prefix_image_type, detect_stream_image_type, is_data_image,
};
pub use source::{ImageSource, SeekRead, MAX_PREFIX_LEN};
pub use types::ImageType;
