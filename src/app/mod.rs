//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for view-state transitions
//! - [`handle_message_side_effects`]: Commands and surface editing
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod shell;
mod update;

pub use effects::handle_message_side_effects;
pub use model::{Chrome, Editor, Model};
pub use shell::{TerminalShell, with_html_extension};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug, Clone)]
pub struct App {
    initial_file: Option<PathBuf>,
    render_location: Option<PathBuf>,
    mouse_enabled: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an application that starts on the bootstrap document.
    pub const fn new() -> Self {
        Self {
            initial_file: None,
            render_location: None,
            mouse_enabled: true,
        }
    }

    /// Open `path` right after start-up, as if chosen with Open.
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.initial_file = path;
        self
    }

    /// Use a fixed render location instead of a per-process temp file.
    pub fn with_render_location(mut self, path: Option<PathBuf>) -> Self {
        self.render_location = path;
        self
    }

    /// Enable or disable mouse capture (clickable controls, wheel scroll).
    pub const fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }
}

#[cfg(test)]
mod tests;
