//! Test doubles shared by unit tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::app::{Editor, Model};
use crate::codec::{Bitmap, ClipboardSource, CodecError};
use crate::dispatch::CommandDispatcher;
use crate::session::{EditorSession, HostShell, NoticeLevel};
use crate::store::MarkupStore;
use crate::surface::HtmlSurface;

#[derive(Debug, Default)]
pub struct FakeClipboard {
    image: Option<Bitmap>,
    text: Option<String>,
    pub image_reads: usize,
}

impl FakeClipboard {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_image(bitmap: Bitmap) -> Self {
        Self {
            image: Some(bitmap),
            ..Self::default()
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }
}

impl ClipboardSource for FakeClipboard {
    fn has_image(&mut self) -> bool {
        self.image.is_some()
    }

    fn image(&mut self) -> Result<Option<Bitmap>, CodecError> {
        self.image_reads += 1;
        Ok(self.image.clone())
    }

    fn text(&mut self) -> Option<String> {
        self.text.clone()
    }
}

/// Shell whose prompts return queued answers; an empty queue cancels.
#[derive(Debug, Default)]
pub struct ScriptedShell {
    save_answers: VecDeque<Option<PathBuf>>,
    open_answers: VecDeque<Option<PathBuf>>,
    pub save_prompts: usize,
    pub open_prompts: usize,
    pub notices: Vec<(NoticeLevel, String)>,
    pub titles: Vec<String>,
}

impl ScriptedShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_save(mut self, answer: Option<PathBuf>) -> Self {
        self.save_answers.push_back(answer);
        self
    }

    pub fn answer_open(mut self, answer: Option<PathBuf>) -> Self {
        self.open_answers.push_back(answer);
        self
    }

    pub fn last_notice(&self) -> Option<&(NoticeLevel, String)> {
        self.notices.last()
    }
}

impl HostShell for ScriptedShell {
    fn prompt_save_path(&mut self) -> Option<PathBuf> {
        self.save_prompts += 1;
        self.save_answers.pop_front().flatten()
    }

    fn prompt_open_path(&mut self) -> Option<PathBuf> {
        self.open_prompts += 1;
        self.open_answers.pop_front().flatten()
    }

    fn notify(&mut self, level: NoticeLevel, message: &str) {
        self.notices.push((level, message.to_string()));
    }

    fn set_title(&mut self, text: &str) {
        self.titles.push(text.to_string());
    }
}

/// A session rendering under `dir` with the bootstrap document displayed.
pub fn started_editor(dir: &Path) -> (EditorSession, HtmlSurface) {
    let store = MarkupStore::new(dir.join("render").join("editor.html"));
    let mut session = EditorSession::new(store);
    let mut surface = HtmlSurface::new();
    session.start(&mut surface).unwrap();
    (session, surface)
}

/// A full application model around [`started_editor`]'s setup, with the
/// dispatcher already listening.
pub fn started_model(dir: &Path, size: (u16, u16)) -> Model {
    let (session, surface) = started_editor(dir);
    let mut editor = Editor {
        surface,
        session,
        dispatcher: CommandDispatcher::new(),
    };
    editor.pump_surface_events();
    Model::new(editor, size)
}
