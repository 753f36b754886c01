use crossterm::event::KeyEvent;

use crate::app::Model;
use crate::session::CommandId;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Commands
    /// A control (button or function key) was activated
    Control(CommandId),
    /// A key event delivered to the embedded surface
    SurfaceKey(KeyEvent),

    // Navigation
    /// Scroll the document pane up by n lines
    ScrollUp(usize),
    /// Scroll the document pane down by n lines
    ScrollDown(usize),

    // Overlays
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the view state based on a message.
///
/// Commands and surface input are side effects and are handled in
/// `App::handle_message_side_effects`.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ScrollUp(n) => {
            model.scroll_offset = model.scroll_offset.saturating_sub(n);
        }
        Message::ScrollDown(n) => {
            let max = model.region_line_count().saturating_sub(1);
            model.scroll_offset = (model.scroll_offset + n).min(max);
        }
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Resize(width, height) => model.terminal_size = (width, height),
        Message::Quit => model.should_quit = true,
        Message::Control(_) | Message::SurfaceKey(_) => {}
    }
    model
}
