//! Clipboard image transcoding.
//!
//! Turns the bitmap currently on the system clipboard into a base64 PNG
//! payload that can be dropped straight into a `data:` URI.

mod clipboard;

pub use clipboard::{ClipboardSource, SystemClipboard};

use std::io::Cursor;

use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// Errors produced while reading or encoding a clipboard image.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The clipboard holds no image. Expected and recoverable.
    #[error("clipboard has no image")]
    NoImage,
    /// The clipboard backend failed for a reason other than missing content.
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    /// The pixel buffer does not match the advertised dimensions.
    #[error("malformed bitmap: {width}x{height} with {len} bytes")]
    MalformedBitmap { width: u32, height: u32, len: usize },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Raw RGBA pixels as read from the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 pixels, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl Bitmap {
    pub const fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }

    /// A single-colour bitmap, mostly useful for tests and benchmarks.
    pub fn solid(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let rgba = pixel.iter().copied().cycle().take(count * 4).collect();
        Self::new(width, height, rgba)
    }

    fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Encode whatever image the clipboard currently holds.
///
/// # Errors
/// Returns [`CodecError::NoImage`] when there is nothing to paste, which
/// callers should report as a notice rather than a failure.
pub fn encode(clipboard: &mut impl ClipboardSource) -> Result<String, CodecError> {
    let bitmap = clipboard.image()?.ok_or(CodecError::NoImage)?;
    encode_bitmap(&bitmap)
}

/// Encode a bitmap as PNG, then as standard padded base64 on a single line.
///
/// # Errors
/// Fails when the pixel buffer is inconsistent with the dimensions or the PNG
/// encoder rejects the image.
pub fn encode_bitmap(bitmap: &Bitmap) -> Result<String, CodecError> {
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(CodecError::NoImage);
    }
    if bitmap.rgba.len() != bitmap.expected_len() {
        return Err(CodecError::MalformedBitmap {
            width: bitmap.width,
            height: bitmap.height,
            len: bitmap.rgba.len(),
        });
    }

    let mut png = Cursor::new(Vec::new());
    PngEncoder::new(&mut png).write_image(
        &bitmap.rgba,
        bitmap.width,
        bitmap.height,
        ExtendedColorType::Rgba8,
    )?;
    let png = png.into_inner();
    tracing::debug!(
        width = bitmap.width,
        height = bitmap.height,
        png_bytes = png.len(),
        "encoded clipboard image"
    );
    Ok(base64::engine::general_purpose::STANDARD.encode(png))
}

/// Inline image element for an encoded PNG payload.
pub fn image_tag(encoded: &str) -> String {
    format!("<img src=\"data:image/png;base64,{encoded}\">")
}
