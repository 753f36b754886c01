//! Terminal UI components.
//!
//! The screen is a stack of one-row bars around the document pane:
//! title on top, then the document, the control bar, the notice (only while
//! one is active) and the status bar at the bottom.

mod document;
mod overlays;
mod status;

pub use document::{abbreviate_data_uris, caret_window};
pub use overlays::{centered_popup_rect, render_prompt};
pub use status::{CONTROLS, control_at};

use ratatui::prelude::*;

use crate::app::Model;

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub document: Rect,
    pub controls: Rect,
    pub toast: Option<Rect>,
    pub status: Rect,
}

/// Split `area` into the screen's bars and the document pane.
pub fn layout(area: Rect, toast_active: bool) -> ScreenLayout {
    let toast_rows = u16::from(toast_active);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(toast_rows),
            Constraint::Length(1),
        ])
        .split(area);
    ScreenLayout {
        title: chunks[0],
        document: chunks[1],
        controls: chunks[2],
        toast: toast_active.then_some(chunks[3]),
        status: chunks[4],
    }
}

/// Height of the document pane for a terminal of `rows` rows.
pub fn document_height(rows: u16, toast_active: bool) -> usize {
    let area = Rect::new(0, 0, 1, rows);
    layout(area, toast_active).document.height as usize
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let screen = layout(area, model.chrome.active_toast().is_some());

    status::render_title_bar(&model.chrome, frame, screen.title);
    document::render_document(model, frame, screen.document);
    status::render_control_bar(frame, screen.controls);
    if let Some(toast_area) = screen.toast {
        status::render_toast_bar(&model.chrome, frame, toast_area);
    }
    status::render_status_bar(model, frame, screen.status);

    if model.help_visible {
        overlays::render_help_overlay(frame, area);
    }
}
