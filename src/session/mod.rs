//! Editor session: document identity and the persistence / paste commands.
//!
//! The session owns exactly one piece of state, the path the live document
//! is bound to. Everything else is read from or pushed to the [`Surface`]
//! at the moment a command runs.

use std::path::{Path, PathBuf};

use crate::codec::{self, ClipboardSource, CodecError};
use crate::store::{MarkupStore, StoreError};
use crate::surface::{Surface, SurfaceError};

/// Window title while no file is bound.
pub const APP_TITLE: &str = "Simple HTML Editor";

/// The logical commands a user can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    /// Ask for a destination and write there.
    Save,
    /// Write to the bound path, or behave as [`CommandId::Save`] when unbound.
    Overwrite,
    /// Ask for a file and display it.
    Open,
    /// Append the clipboard image to the editable region.
    PasteImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// What the session needs from the window hosting it.
pub trait HostShell {
    /// Ask where to save. `None` means the user dismissed the prompt.
    fn prompt_save_path(&mut self) -> Option<PathBuf>;
    /// Ask which file to open. `None` means the user dismissed the prompt.
    fn prompt_open_path(&mut self) -> Option<PathBuf>;
    /// Fire-and-forget message to the user.
    fn notify(&mut self, level: NoticeLevel, message: &str);
    fn set_title(&mut self, text: &str);
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cancelled by user")]
    UserCancelled,
    #[error("clipboard has no image")]
    NoImage,
    #[error(transparent)]
    Io(#[from] StoreError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Codec(CodecError),
}

impl From<CodecError> for SessionError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::NoImage => Self::NoImage,
            other => Self::Codec(other),
        }
    }
}

/// Result of a command that completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved(PathBuf),
    Overwritten(PathBuf),
    Opened(PathBuf),
    ImagePasted { encoded_len: usize },
}

/// Bound or unbound view of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState<'a> {
    Unbound,
    Bound(&'a Path),
}

#[derive(Debug)]
pub struct EditorSession {
    bound_path: Option<PathBuf>,
    store: MarkupStore,
}

impl EditorSession {
    pub const fn new(store: MarkupStore) -> Self {
        Self {
            bound_path: None,
            store,
        }
    }

    pub fn bound_path(&self) -> Option<&Path> {
        self.bound_path.as_deref()
    }

    pub fn state(&self) -> SessionState<'_> {
        self.bound_path
            .as_deref()
            .map_or(SessionState::Unbound, SessionState::Bound)
    }

    pub const fn store(&self) -> &MarkupStore {
        &self.store
    }

    /// Display the bootstrap document. The session stays unbound.
    ///
    /// # Errors
    /// Fails if the render location cannot be written or displayed.
    pub fn start(&mut self, surface: &mut impl Surface) -> Result<(), SessionError> {
        let location = self
            .store
            .materialize_for_display(MarkupStore::bootstrap_markup())?;
        surface.navigate(location)?;
        Ok(())
    }

    /// Prompt for a destination, write the live markup there and bind to it.
    ///
    /// # Errors
    /// [`SessionError::UserCancelled`] when the prompt is dismissed,
    /// [`SessionError::Io`] when the write fails or the path is the render
    /// location. The binding is unchanged in every case.
    pub fn save(
        &mut self,
        surface: &impl Surface,
        shell: &mut impl HostShell,
    ) -> Result<Outcome, SessionError> {
        let path = shell.prompt_save_path().ok_or(SessionError::UserCancelled)?;
        let markup = surface.current_markup();
        self.store.save_to_path(&path, &markup)?;
        self.bind(path.clone(), shell);
        Ok(Outcome::Saved(path))
    }

    /// Write the live markup to the bound path, or fall back to [`save`].
    ///
    /// # Errors
    /// See [`save`]; a failed write to the bound path is [`SessionError::Io`].
    ///
    /// [`save`]: Self::save
    pub fn overwrite(
        &mut self,
        surface: &impl Surface,
        shell: &mut impl HostShell,
    ) -> Result<Outcome, SessionError> {
        let Some(path) = self.bound_path.clone() else {
            return self.save(surface, shell);
        };
        let markup = surface.current_markup();
        self.store.save_to_path(&path, &markup)?;
        Ok(Outcome::Overwritten(path))
    }

    /// Prompt for a file, display it and bind to it.
    ///
    /// # Errors
    /// [`SessionError::UserCancelled`] when the prompt is dismissed; otherwise
    /// see [`open_path`](Self::open_path).
    pub fn open(
        &mut self,
        surface: &mut impl Surface,
        shell: &mut impl HostShell,
    ) -> Result<Outcome, SessionError> {
        let path = shell.prompt_open_path().ok_or(SessionError::UserCancelled)?;
        self.open_path(path, surface, shell)
    }

    /// Display the file at `path` and bind to it, without prompting.
    ///
    /// # Errors
    /// [`SessionError::Io`] if the file cannot be read or materialized, or is
    /// the render location itself,
    /// [`SessionError::Surface`] if the surface cannot display it. The
    /// binding and the displayed document are unchanged on failure.
    pub fn open_path(
        &mut self,
        path: PathBuf,
        surface: &mut impl Surface,
        shell: &mut impl HostShell,
    ) -> Result<Outcome, SessionError> {
        let markup = self.store.load_from_path(&path)?;
        let location = self.store.materialize_for_display(&markup)?;
        surface.navigate(location)?;
        self.bind(path.clone(), shell);
        Ok(Outcome::Opened(path))
    }

    /// Append the clipboard image to the end of the editable region.
    ///
    /// # Errors
    /// [`SessionError::NoImage`] when the clipboard has no image; the
    /// document is untouched on any error.
    pub fn paste_image(
        &mut self,
        surface: &mut impl Surface,
        clipboard: &mut impl ClipboardSource,
    ) -> Result<Outcome, SessionError> {
        let encoded = codec::encode(clipboard)?;
        surface.append_to_editable_region(&codec::image_tag(&encoded))?;
        Ok(Outcome::ImagePasted {
            encoded_len: encoded.len(),
        })
    }

    /// Run `command` and report the result through the shell.
    ///
    /// Cancelled prompts are not reported.
    pub fn execute(
        &mut self,
        command: CommandId,
        surface: &mut impl Surface,
        shell: &mut impl HostShell,
        clipboard: &mut impl ClipboardSource,
    ) -> Option<Outcome> {
        tracing::debug!(?command, state = ?self.state(), "executing command");
        let result = match command {
            CommandId::Save => self.save(surface, shell),
            CommandId::Overwrite => self.overwrite(surface, shell),
            CommandId::Open => self.open(surface, shell),
            CommandId::PasteImage => self.paste_image(surface, clipboard),
        };
        match result {
            Ok(outcome) => {
                shell.notify(NoticeLevel::Info, &describe(&outcome));
                Some(outcome)
            }
            Err(SessionError::UserCancelled) => {
                tracing::debug!(?command, "command cancelled");
                None
            }
            Err(SessionError::NoImage) => {
                shell.notify(NoticeLevel::Warning, "Clipboard has no image");
                None
            }
            Err(err) => {
                tracing::warn!(?command, "command failed: {err}");
                shell.notify(NoticeLevel::Error, &err.to_string());
                None
            }
        }
    }

    fn bind(&mut self, path: PathBuf, shell: &mut impl HostShell) {
        shell.set_title(&bound_title(&path));
        self.bound_path = Some(path);
    }
}

/// Title shown while bound to `path`.
pub fn bound_title(path: &Path) -> String {
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    format!("{name} - {APP_TITLE}")
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Saved(path) => format!("HTML saved to {}", path.display()),
        Outcome::Overwritten(path) => format!("Overwrote {}", path.display()),
        Outcome::Opened(path) => format!("Opened {}", path.display()),
        Outcome::ImagePasted { .. } => "Image pasted".to_string(),
    }
}
