use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let lines = vec![
        Line::styled("Commands", section_style),
        Line::raw("  F2                  Save as..."),
        Line::raw("  F3 / Ctrl-s         Overwrite (save as when unsaved)"),
        Line::raw("  F4 / Ctrl-v         Paste clipboard image"),
        Line::raw("  F5 / Ctrl-o         Open file"),
        Line::raw("  Click a button      Same as its function key"),
        Line::raw(""),
        Line::styled("Editing", section_style),
        Line::raw("  Type                Insert at caret"),
        Line::raw("  Arrows, Home/End    Move caret"),
        Line::raw("  Backspace / Delete  Remove character"),
        Line::raw("  Ctrl-v (text)       Paste clipboard text"),
        Line::raw("  PageUp/PageDown     Scroll"),
        Line::raw(""),
        Line::styled("Other", section_style),
        Line::raw("  F1                  Toggle help"),
        Line::raw("  Ctrl-q              Quit"),
        Line::raw(""),
        Line::styled("any key closes", dim_style),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Full-screen path prompt shown while a command waits for a file name.
pub fn render_prompt(frame: &mut Frame, title: &str, label: &str, input: &str) {
    let area = frame.area();
    let title_area = Rect { height: 1, ..area };
    let bar = Paragraph::new(format!(" {title}"))
        .style(Style::default().bg(Color::Blue).fg(Color::White).bold());
    frame.render_widget(bar, title_area);

    let popup_width = area.width.saturating_sub(8).clamp(20, 80);
    let popup = centered_popup_rect(popup_width, 7, area);
    let block = Block::default()
        .title(label.to_string())
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);

    // Keep the tail of long input visible
    let room = usize::from(inner.width.saturating_sub(1));
    let mut shown = input;
    while shown.width() > room {
        let mut chars = shown.chars();
        chars.next();
        shown = chars.as_str();
    }

    let lines = vec![
        Line::raw(""),
        Line::raw(shown.to_string()),
        Line::raw(""),
        Line::styled(
            "Enter confirms \u{2502} Esc cancels",
            Style::default().fg(Color::Indexed(245)),
        ),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);

    // Input is at most `room` columns wide
    #[allow(clippy::cast_possible_truncation)]
    let cursor_x = inner.x + shown.width() as u16;
    frame.set_cursor_position((cursor_x, inner.y + 1));
}

pub fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
