use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::{Context, Result};

/// Maximum number of leading bytes examined when detecting an image type.
///
/// Every known signature fits well within this window, so reads are always
/// bounded regardless of input size.
pub const MAX_PREFIX_LEN: usize = 64;

/// A readable stream whose position can be queried and restored.
pub trait SeekRead: Read + Seek {}

impl<T: Read + Seek> SeekRead for T {}

/// The input to examine, normalized from the shapes callers typically have
/// at hand.
///
/// Seekability is part of the type: streams that can be repositioned go
/// through [`ImageSource::Stream`] and keep their read position intact,
/// while [`ImageSource::RawStream`] consumes bytes from the current
/// position.
pub enum ImageSource<'a> {
    /// Raw bytes already in memory. No I/O is performed.
    Data(&'a [u8]),
    /// A file on disk, opened read-only for the duration of the read.
    File(&'a Path),
    /// An open stream with seek support. The read position is restored
    /// after the read, even when the read fails.
    Stream(&'a mut dyn SeekRead),
    /// An open stream without seek support. Bytes are consumed from the
    /// current position.
    RawStream(&'a mut dyn Read),
}

impl ImageSource<'_> {
    /// Reads the leading bytes of the source.
    ///
    /// # Returns
    /// * `Ok(prefix)` - Up to [`MAX_PREFIX_LEN`] leading bytes; shorter when
    ///   the source itself is shorter
    /// * `Err(_)` - The source could not be read (missing file, permission
    ///   denied, broken stream)
    pub fn read_prefix(&mut self) -> Result<Vec<u8>> {
        match self {
            ImageSource::Data(data) => {
                let len = data.len().min(MAX_PREFIX_LEN);
                Ok(data[..len].to_vec())
            }
            ImageSource::File(path) => {
                let mut file = File::open(*path)
                    .with_context(|| format!("open image file: {}", path.display()))?;
                read_prefix_bytes(&mut file)
            }
            ImageSource::Stream(stream) => {
                let pos = stream.stream_position().context("get stream position")?;
                let result = stream
                    .seek(SeekFrom::Start(0))
                    .context("seek stream to start")
                    .and_then(|_| read_prefix_bytes(&mut **stream));
                // Restore must run even when the read failed.
                let restored = stream
                    .seek(SeekFrom::Start(pos))
                    .context("restore stream position");
                let prefix = result?;
                restored?;
                Ok(prefix)
            }
            ImageSource::RawStream(stream) => read_prefix_bytes(&mut **stream),
        }
    }
}

fn read_prefix_bytes<R>(reader: &mut R) -> Result<Vec<u8>>
where
    R: Read + ?Sized,
{
    let mut buf = Vec::with_capacity(MAX_PREFIX_LEN);
    (&mut *reader)
        .take(MAX_PREFIX_LEN as u64)
        .read_to_end(&mut buf)
        .context("read image prefix")?;
    Ok(buf)
}
