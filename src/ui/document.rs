use std::borrow::Cow;
use std::sync::LazyLock;

use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph, Wrap};
use regex::{Captures, Regex};
use unicode_width::UnicodeWidthChar;

use crate::app::Model;
use crate::surface::Surface;

static DATA_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(data:[a-z]+/[a-z0-9.+-]+;base64,)([A-Za-z0-9+/]{24,}=*)")
        .expect("data URI pattern is valid")
});

/// Shorten inline base64 payloads so a pasted image does not flood the pane.
pub fn abbreviate_data_uris(line: &str) -> Cow<'_, str> {
    DATA_URI.replace_all(line, |caps: &Captures<'_>| {
        format!("{}\u{2026}[{} bytes]", &caps[1], caps[2].len())
    })
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(1)
}

/// Index of the first char of `line` to show so that the char at `col`
/// (or the cell just past the end) fits in `width` columns.
pub fn caret_window(line: &str, col: usize, width: usize) -> usize {
    let widths: Vec<usize> = line.chars().map(char_width).collect();
    let col = col.min(widths.len());
    let caret_cell = widths.get(col).copied().unwrap_or(1).max(1);
    let mut used = widths[..col].iter().sum::<usize>() + caret_cell;
    let mut start = 0;
    while used > width && start < col {
        used -= widths[start];
        start += 1;
    }
    start
}

fn gutter_width(total_lines: usize) -> usize {
    total_lines.max(1).to_string().len()
}

pub fn render_document(model: &Model, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
    let Some(region) = model.editor.surface.region() else {
        render_without_region(model, frame, area);
        return;
    };

    let total = region.line_count();
    let gutter = gutter_width(total);
    let text_width = usize::from(area.width).saturating_sub(gutter + 1);
    let caret = region.caret();
    let start = model.scroll_offset.min(total.saturating_sub(1));
    let end = (start + usize::from(area.height)).min(total);

    let gutter_style = Style::default().fg(Color::DarkGray);
    let mut content: Vec<Line> = Vec::with_capacity(end.saturating_sub(start));
    let mut cursor = None;
    for line_idx in start..end {
        let raw = region.line(line_idx).unwrap_or_default().replace('\t', " ");
        let number = Span::styled(
            format!("{:>gutter$} ", line_idx + 1, gutter = gutter),
            gutter_style,
        );
        if line_idx == caret.line {
            let first = caret_window(&raw, caret.col, text_width);
            let shown: String = raw.chars().skip(first).collect();
            let offset: usize = raw
                .chars()
                .skip(first)
                .take(caret.col.saturating_sub(first))
                .map(char_width)
                .sum();
            cursor = Some((gutter + 1 + offset, line_idx - start));
            content.push(Line::from(vec![number, Span::raw(shown)]));
        } else {
            let shown = abbreviate_data_uris(&raw).into_owned();
            content.push(Line::from(vec![number, Span::raw(shown)]));
        }
    }
    frame.render_widget(Paragraph::new(content), area);

    if !model.help_visible
        && let Some((x, y)) = cursor
        && let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y))
        && x < area.width
    {
        frame.set_cursor_position((area.x + x, area.y + y));
    }
}

fn render_without_region(model: &Model, frame: &mut Frame, area: Rect) {
    let markup = model.editor.surface.current_markup();
    let dim = Style::default().fg(Color::Indexed(245));
    let mut lines = vec![
        Line::styled(
            "This document has no editable region; commands still work on its markup.",
            Style::default().fg(Color::Yellow),
        ),
        Line::raw(""),
    ];
    lines.extend(
        markup
            .lines()
            .map(|line| Line::styled(abbreviate_data_uris(line).into_owned(), dim)),
    );
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
