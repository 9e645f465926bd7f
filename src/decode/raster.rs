//! Raster decoding into layer handles.
//!
//! Any format the `image` crate can sniff from the leading bytes is
//! accepted; there is no size limit. Only the header is read, for the
//! pixel size. The handle is a `data:` URL of the original bytes plus
//! that size.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64ct::{Base64, Encoding};
use image::io::Reader;
use image::ImageFormat;

use crate::core::DecodeError;
use crate::layers::ImageHandle;

/// Bytes to decode, in memory or on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Bytes(Vec<u8>),
    File(PathBuf),
}

impl ImageSource {
    /// Read (if needed) and decode. Blocking.
    pub fn decode(&self) -> Result<ImageHandle, DecodeError> {
        match self {
            ImageSource::Bytes(bytes) => decode_image(bytes),
            ImageSource::File(path) => decode_file(path),
        }
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(bytes)
    }
}

impl From<&[u8]> for ImageSource {
    fn from(bytes: &[u8]) -> Self {
        ImageSource::Bytes(bytes.to_vec())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::File(path)
    }
}

fn mime_type(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Bmp => Some("image/bmp"),
        _ => None,
    }
}

/// `data:<mime>;base64,<payload>`
#[must_use]
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", Base64::encode_string(bytes))
}

/// Decode in-memory image bytes.
pub fn decode_image(bytes: &[u8]) -> Result<ImageHandle, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::UnknownFormat)?;
    let mime = mime_type(format).ok_or(DecodeError::UnknownFormat)?;
    let mut reader = Reader::with_format(Cursor::new(bytes), format);
    reader.no_limits();
    let (width, height) = reader.into_dimensions()?;
    log::debug!("decoded {mime} {width}x{height} ({} bytes)", bytes.len());
    Ok(ImageHandle::new(data_url(mime, bytes), width, height))
}

/// Read and decode an image file.
pub fn decode_file(path: &Path) -> Result<ImageHandle, DecodeError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}
