//! The embedded editing surface.
//!
//! The session and dispatcher only talk to the [`Surface`] trait.
//! [`HtmlSurface`] is the in-process implementation used by the terminal host.

mod html;
mod region;

pub use html::HtmlSurface;
pub use region::{EDITABLE_REGION_ID, RegionSpan, locate_editable_region};

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("failed to load {}: {source}", path.display())]
    Navigate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("document has no element with id=\"{EDITABLE_REGION_ID}\"")]
    NoEditableRegion,
    #[error("no document loaded")]
    NotLoaded,
}

/// A key listener attached to one loaded document.
///
/// Navigating replaces the document, which silently kills every
/// subscription made against the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub(crate) document: u64,
    pub(crate) listener: u32,
}

impl Subscription {
    /// Identifier of the document this subscription was made against.
    pub const fn document(self) -> u64 {
        self.document
    }
}

/// Notifications raised by the surface for the host to drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// A navigation finished and the given document is ready for input.
    DocumentReady(u64),
}

/// Query and mutate capability over the live document.
pub trait Surface {
    /// Full markup of the live document as it stands right now.
    fn current_markup(&self) -> String;

    /// Replace the live document with the one at `location`.
    ///
    /// # Errors
    /// Fails if the location cannot be read; the previous document stays.
    fn navigate(&mut self, location: &Path) -> Result<(), SurfaceError>;

    /// Append a fragment to the end of the editable region in one mutation.
    ///
    /// # Errors
    /// Fails if nothing is loaded or the document has no editable region.
    fn append_to_editable_region(&mut self, fragment: &str) -> Result<(), SurfaceError>;

    /// Attach a key listener to the current document.
    ///
    /// Returns `None` when no document is loaded.
    fn subscribe_keys(&mut self) -> Option<Subscription>;

    /// Whether `subscription` is still attached to the current document.
    fn is_subscribed(&self, subscription: Subscription) -> bool;
}
