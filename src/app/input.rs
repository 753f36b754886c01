use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton};
use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::session::CommandId;

/// Lines moved per mouse wheel notch.
const WHEEL_STEP: usize = 3;

impl App {
    pub(super) fn handle_event(&self, event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) => self.handle_key(*key, model),
            Event::Mouse(mouse) => self.handle_mouse(*mouse, model),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(&self, key: KeyEvent, model: &Model) -> Option<Message> {
        let pressed = key.kind != KeyEventKind::Release;
        if model.help_visible {
            return pressed.then_some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let page = model.terminal_size.1.saturating_sub(4).max(1) as usize;
        let host = match key.code {
            KeyCode::Char('q' | 'Q') if ctrl => Some(Message::Quit),
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::F(2) => Some(Message::Control(CommandId::Save)),
            KeyCode::F(3) => Some(Message::Control(CommandId::Overwrite)),
            KeyCode::F(4) => Some(Message::Control(CommandId::PasteImage)),
            KeyCode::F(5) => Some(Message::Control(CommandId::Open)),
            KeyCode::PageUp => Some(Message::ScrollUp(page)),
            KeyCode::PageDown => Some(Message::ScrollDown(page)),
            _ => None,
        };
        match host {
            // Host keys act once per press
            Some(msg) => (key.kind == KeyEventKind::Press).then_some(msg),
            // Everything else belongs to the surface, releases included
            None => Some(Message::SurfaceKey(key)),
        }
    }

    pub(super) fn handle_mouse(&self, mouse: MouseEvent, model: &Model) -> Option<Message> {
        if !self.mouse_enabled || model.help_visible {
            return None;
        }
        let (width, height) = model.terminal_size;
        let screen = crate::ui::layout(
            Rect::new(0, 0, width, height),
            model.chrome.active_toast().is_some(),
        );

        match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) if in_rect(mouse, screen.controls) => {
                crate::ui::control_at(mouse.column - screen.controls.x).map(Message::Control)
            }
            MouseEventKind::ScrollDown if in_rect(mouse, screen.document) => {
                Some(Message::ScrollDown(WHEEL_STEP))
            }
            MouseEventKind::ScrollUp if in_rect(mouse, screen.document) => {
                Some(Message::ScrollUp(WHEEL_STEP))
            }
            _ => None,
        }
    }
}

const fn in_rect(mouse: MouseEvent, area: Rect) -> bool {
    mouse.column >= area.x
        && mouse.column < area.x + area.width
        && mouse.row >= area.y
        && mouse.row < area.y + area.height
}
