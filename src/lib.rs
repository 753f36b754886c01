// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. codec::CodecError)
    clippy::module_name_repetitions
)]

//! # htmlpad
//!
//! A minimal HTML editor for the terminal.
//!
//! htmlpad shows one HTML document and lets the user edit the contents of
//! its editable region (the element with `id="editor"`):
//! - Save as, overwrite and open HTML files
//! - Paste the clipboard image as an inline base64 PNG
//! - Keyboard shortcuts and clickable controls for every command
//!
//! ## Architecture
//!
//! The editing core is independent of the terminal:
//! - **Session**: bound file, command semantics ([`session`])
//! - **Store**: file I/O and the render location ([`store`])
//! - **Codec**: clipboard bitmap to base64 PNG ([`codec`])
//! - **Surface**: the displayed document and its key stream ([`surface`])
//! - **Dispatcher**: shortcut routing and suppression ([`dispatch`])
//!
//! The terminal host uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`config`]: Saved default flags
//! - [`editor`]: Text buffer behind the editable region
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod editor;
pub mod session;
pub mod store;
pub mod surface;
pub mod ui;

#[cfg(test)]
mod testing;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::codec::{ClipboardSource, SystemClipboard};
    pub use crate::dispatch::CommandDispatcher;
    pub use crate::session::{CommandId, EditorSession, HostShell, NoticeLevel, Outcome};
    pub use crate::store::MarkupStore;
    pub use crate::surface::{HtmlSurface, Surface};
}
