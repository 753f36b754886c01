use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Chrome, Model};
use crate::session::{CommandId, NoticeLevel, SessionState};

/// Control bar buttons, left to right: command, function key, label.
pub const CONTROLS: [(CommandId, &str, &str); 4] = [
    (CommandId::Save, "F2", "Save"),
    (CommandId::Overwrite, "F3", "Overwrite"),
    (CommandId::PasteImage, "F4", "Paste image"),
    (CommandId::Open, "F5", "Open"),
];

const BUTTON_GAP: u16 = 1;

fn button_text(key: &str, label: &str) -> String {
    format!(" {key} {label} ")
}

/// Column ranges `[start, end)` of each button, relative to the bar.
fn button_spans() -> impl Iterator<Item = (CommandId, u16, u16)> {
    let mut x = 0_u16;
    CONTROLS.iter().map(move |(command, key, label)| {
        // Labels are short ASCII
        #[allow(clippy::cast_possible_truncation)]
        let width = button_text(key, label).len() as u16;
        let start = x;
        x = x.saturating_add(width + BUTTON_GAP);
        (*command, start, start + width)
    })
}

/// The button under `column`, relative to the start of the control bar.
pub fn control_at(column: u16) -> Option<CommandId> {
    button_spans()
        .find(|(_, start, end)| (*start..*end).contains(&column))
        .map(|(command, _, _)| command)
}

pub fn render_title_bar(chrome: &Chrome, frame: &mut Frame, area: Rect) {
    let bar = Paragraph::new(format!(" {}", chrome.title))
        .style(Style::default().bg(Color::Blue).fg(Color::White).bold());
    frame.render_widget(bar, area);
}

pub fn render_control_bar(frame: &mut Frame, area: Rect) {
    let button = Style::default().bg(Color::DarkGray).fg(Color::White);
    let key_style = button.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(CONTROLS.len() * 3);
    for (idx, (_, key, label)) in CONTROLS.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" ".repeat(BUTTON_GAP as usize)));
        }
        spans.push(Span::styled(format!(" {key}"), key_style));
        spans.push(Span::styled(format!(" {label} "), button));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let file = match model.editor.session.state() {
        SessionState::Bound(path) => path.display().to_string(),
        SessionState::Unbound => "unsaved".to_string(),
    };
    let caret_info = model.editor.surface.region().map_or_else(
        || "  [no editable region]".to_string(),
        |region| {
            let caret = region.caret();
            format!("  Ln {}, Col {}", caret.line + 1, caret.col + 1)
        },
    );
    let status = format!(" {file}{caret_info}  F1:help  Ctrl+Q:quit");
    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(chrome: &Chrome, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = chrome.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        NoticeLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        NoticeLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        NoticeLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
