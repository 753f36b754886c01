use std::time::{Duration, Instant};

use crate::dispatch::CommandDispatcher;
use crate::session::{APP_TITLE, EditorSession, NoticeLevel};
use crate::store::MarkupStore;
use crate::surface::{HtmlSurface, SurfaceEvent};

/// How long a notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
struct Toast {
    level: NoticeLevel,
    message: String,
    expires_at: Instant,
}

/// Window decorations owned by the host: title and the current notice.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub title: String,
    toast: Option<Toast>,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            title: APP_TITLE.to_string(),
            toast: None,
        }
    }
}

impl Chrome {
    pub fn show_toast(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + NOTICE_TTL,
        });
    }

    /// Drop the notice once it has expired. Returns `true` if one was dropped.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, NoticeLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

/// The editing core: surface, session and the dispatcher wired between them.
#[derive(Debug)]
pub struct Editor {
    pub surface: HtmlSurface,
    pub session: EditorSession,
    pub dispatcher: CommandDispatcher,
}

impl Editor {
    pub fn new(store: MarkupStore) -> Self {
        Self {
            surface: HtmlSurface::new(),
            session: EditorSession::new(store),
            dispatcher: CommandDispatcher::new(),
        }
    }

    /// Forward surface notifications to the dispatcher.
    ///
    /// Must run after anything that may have navigated the surface, otherwise
    /// shortcuts stop working on the new document.
    pub fn pump_surface_events(&mut self) {
        for event in self.surface.take_events() {
            match event {
                SurfaceEvent::DocumentReady(document) => {
                    let attached = self.dispatcher.on_surface_ready(&mut self.surface);
                    tracing::debug!(document, attached, "surface ready");
                }
            }
        }
    }
}

/// The complete application state.
#[derive(Debug)]
pub struct Model {
    pub editor: Editor,
    pub chrome: Chrome,
    /// Terminal size (columns, rows)
    pub terminal_size: (u16, u16),
    /// First region line shown in the document pane
    pub scroll_offset: usize,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    pub fn new(editor: Editor, terminal_size: (u16, u16)) -> Self {
        Self {
            editor,
            chrome: Chrome::default(),
            terminal_size,
            scroll_offset: 0,
            help_visible: false,
            should_quit: false,
        }
    }

    /// Keep the caret line inside a pane of `height` rows.
    pub fn follow_caret(&mut self, height: usize) {
        let Some(region) = self.editor.surface.region() else {
            self.scroll_offset = 0;
            return;
        };
        let line = region.caret().line;
        if height == 0 {
            return;
        }
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + height {
            self.scroll_offset = line + 1 - height;
        }
    }

    pub fn region_line_count(&self) -> usize {
        self.editor
            .surface
            .region()
            .map_or(0, crate::editor::RegionBuffer::line_count)
    }
}
