use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::effects::handle_message_side_effects;
use crate::app::shell::TerminalShell;
use crate::app::{App, Editor, Message, Model, update};
use crate::codec::{ClipboardSource, SystemClipboard};
use crate::session::{HostShell, NoticeLevel};
use crate::store::MarkupStore;

/// Idle wait between polls; short enough for notices to expire on time.
const IDLE_POLL: Duration = Duration::from_millis(250);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the starting document cannot be displayed, the
    /// terminal cannot be initialized, or terminal I/O fails.
    pub fn run(&self) -> Result<()> {
        // Clipboard backends may talk to the display server; connect before
        // the terminal switches to raw mode.
        let mut clipboard = SystemClipboard::new();

        let store = self
            .render_location
            .clone()
            .map_or_else(MarkupStore::in_temp_dir, MarkupStore::new);
        tracing::debug!(render = %store.render_location().display(), "render location");
        let mut editor = Editor::new(store);
        editor
            .session
            .start(&mut editor.surface)
            .context("Failed to display the starting document")?;
        editor.pump_surface_events();

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: htmlpad requires an interactive terminal")?;
        let size = terminal.size()?;
        let mut model = Model::new(editor, (size.width, size.height));

        if let Some(path) = self.initial_file.clone() {
            let mut shell = TerminalShell::new(&mut terminal, &mut model.chrome);
            if let Err(err) =
                model
                    .editor
                    .session
                    .open_path(path, &mut model.editor.surface, &mut shell)
            {
                tracing::warn!("initial open failed: {err}");
                shell.notify(NoticeLevel::Error, &err.to_string());
            }
            model.editor.pump_surface_events();
        }

        if self.mouse_enabled {
            execute!(stdout(), EnableMouseCapture)?;
        }

        let result = self.event_loop(&mut terminal, model, &mut clipboard);

        // Restore terminal
        if self.mouse_enabled {
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        ratatui::restore();

        result
    }

    fn event_loop(
        &self,
        terminal: &mut DefaultTerminal,
        mut model: Model,
        clipboard: &mut impl ClipboardSource,
    ) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.chrome.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let poll = if needs_render {
                Duration::ZERO
            } else {
                IDLE_POLL
            };
            // Drain everything already queued so key bursts render once.
            let mut wait = poll;
            while event::poll(wait)? {
                wait = Duration::ZERO;
                let Some(msg) = self.handle_event(&event::read()?, &model) else {
                    continue;
                };
                model = Self::apply_message(terminal, model, clipboard, msg);
                needs_render = true;
                if model.should_quit {
                    break;
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(&model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn apply_message(
        terminal: &mut DefaultTerminal,
        model: Model,
        clipboard: &mut impl ClipboardSource,
        msg: Message,
    ) -> Model {
        let moves_caret = matches!(msg, Message::Control(_) | Message::SurfaceKey(_));
        let side_msg = msg.clone();
        let mut model = update(model, msg);

        let mut shell = TerminalShell::new(terminal, &mut model.chrome);
        handle_message_side_effects(&mut model.editor, &mut shell, clipboard, &side_msg);

        if moves_caret {
            let height = crate::ui::document_height(
                model.terminal_size.1,
                model.chrome.active_toast().is_some(),
            );
            model.follow_caret(height);
        }
        model
    }
}
