use std::io::stdout;
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::DefaultTerminal;

use crate::app::Chrome;
use crate::session::{HostShell, NoticeLevel};

/// [`HostShell`] backed by the terminal: prompts are modal overlays and
/// notices become toasts.
pub struct TerminalShell<'a> {
    terminal: &'a mut DefaultTerminal,
    chrome: &'a mut Chrome,
}

impl<'a> TerminalShell<'a> {
    pub fn new(terminal: &'a mut DefaultTerminal, chrome: &'a mut Chrome) -> Self {
        Self { terminal, chrome }
    }

    /// Read a path in a modal prompt. `None` when dismissed or left empty.
    fn prompt(&mut self, label: &str) -> Option<PathBuf> {
        let mut input = String::new();
        loop {
            let title = &self.chrome.title;
            let drawn = self.terminal.draw(|frame| {
                crate::ui::render_prompt(frame, title, label, &input);
            });
            if let Err(err) = drawn {
                tracing::warn!("prompt render failed: {err}");
                return None;
            }

            let key = match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => key,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!("prompt input failed: {err}");
                    return None;
                }
            };
            match key.code {
                KeyCode::Esc => return None,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return None;
                }
                KeyCode::Enter => {
                    let trimmed = input.trim();
                    return (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    input.push(c);
                }
                _ => {}
            }
        }
    }
}

impl HostShell for TerminalShell<'_> {
    fn prompt_save_path(&mut self) -> Option<PathBuf> {
        self.prompt("Save as (HTML file)").map(with_html_extension)
    }

    fn prompt_open_path(&mut self) -> Option<PathBuf> {
        self.prompt("Open HTML file")
    }

    fn notify(&mut self, level: NoticeLevel, message: &str) {
        self.chrome.show_toast(level, message);
    }

    fn set_title(&mut self, text: &str) {
        self.chrome.title = text.to_string();
        if let Err(err) = execute!(stdout(), SetTitle(text)) {
            tracing::debug!("terminal title not set: {err}");
        }
    }
}

/// Default the extension of a save destination to `.html`.
pub fn with_html_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("html")
    }
}
