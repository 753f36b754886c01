use std::borrow::Cow;

use super::{Bitmap, CodecError};

/// Read-only view of a clipboard.
///
/// Methods take `&mut self` because platform clipboards need exclusive access
/// to talk to the display server; none of them change clipboard contents.
pub trait ClipboardSource {
    /// Whether an image is available right now.
    fn has_image(&mut self) -> bool;

    /// The current clipboard image, `Ok(None)` when there is none.
    ///
    /// # Errors
    /// Returns [`CodecError::Clipboard`] when the backend itself fails.
    fn image(&mut self) -> Result<Option<Bitmap>, CodecError>;

    /// The current clipboard text, used by the surface's native paste.
    fn text(&mut self) -> Option<String>;
}

/// The system clipboard via `arboard`.
///
/// Construction never fails: without a display server (e.g. over SSH) the
/// clipboard simply behaves as empty.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                tracing::warn!("system clipboard unavailable: {err}");
                None
            }
        };
        Self { inner }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSource for SystemClipboard {
    fn has_image(&mut self) -> bool {
        matches!(self.image(), Ok(Some(_)))
    }

    fn image(&mut self) -> Result<Option<Bitmap>, CodecError> {
        let Some(clipboard) = self.inner.as_mut() else {
            return Ok(None);
        };
        match clipboard.get_image() {
            Ok(data) => {
                let width = u32::try_from(data.width)
                    .map_err(|_| CodecError::Clipboard("image too wide".to_string()))?;
                let height = u32::try_from(data.height)
                    .map_err(|_| CodecError::Clipboard("image too tall".to_string()))?;
                let rgba = match data.bytes {
                    Cow::Owned(bytes) => bytes,
                    Cow::Borrowed(bytes) => bytes.to_vec(),
                };
                Ok(Some(Bitmap::new(width, height, rgba)))
            }
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(err) => Err(CodecError::Clipboard(err.to_string())),
        }
    }

    fn text(&mut self) -> Option<String> {
        self.inner.as_mut()?.get_text().ok()
    }
}
