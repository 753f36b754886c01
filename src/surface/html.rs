use std::collections::VecDeque;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::region::locate_editable_region;
use super::{Subscription, Surface, SurfaceError, SurfaceEvent};
use crate::codec::ClipboardSource;
use crate::editor::{Direction, RegionBuffer};

/// One loaded document. Replaced wholesale on every navigation.
struct LiveDocument {
    id: u64,
    /// Markup up to and including the region's opening tag (or the whole
    /// document when it has no editable region).
    before: String,
    region: Option<RegionBuffer>,
    /// Markup from the region's closing tag onwards.
    after: String,
    listeners: Vec<Subscription>,
}

impl LiveDocument {
    fn parse(id: u64, markup: &str) -> Self {
        match locate_editable_region(markup) {
            Some(span) => Self {
                id,
                before: markup[..span.inner.start].to_string(),
                region: Some(RegionBuffer::from_text(&markup[span.inner.clone()])),
                after: markup[span.inner.end..].to_string(),
                listeners: Vec::new(),
            },
            None => Self {
                id,
                before: markup.to_string(),
                region: None,
                after: String::new(),
                listeners: Vec::new(),
            },
        }
    }

    fn markup(&self) -> String {
        let region = self.region.as_ref().map(RegionBuffer::text).unwrap_or_default();
        let mut out = String::with_capacity(self.before.len() + region.len() + self.after.len());
        out.push_str(&self.before);
        out.push_str(&region);
        out.push_str(&self.after);
        out
    }
}

/// In-process HTML surface.
///
/// Only the editable region is editable; the markup around it is carried
/// through untouched.
#[derive(Default)]
pub struct HtmlSurface {
    document: Option<LiveDocument>,
    next_document: u64,
    next_listener: u32,
    events: VecDeque<SurfaceEvent>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain pending notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        self.events.drain(..).collect()
    }

    /// Identifier of the current document, if any.
    pub fn document_id(&self) -> Option<u64> {
        self.document.as_ref().map(|doc| doc.id)
    }

    /// Number of key listeners attached to the current document.
    pub fn key_listener_count(&self) -> usize {
        self.document.as_ref().map_or(0, |doc| doc.listeners.len())
    }

    pub fn region(&self) -> Option<&RegionBuffer> {
        self.document.as_ref()?.region.as_ref()
    }

    fn region_mut(&mut self) -> Option<&mut RegionBuffer> {
        self.document.as_mut()?.region.as_mut()
    }

    /// Default handling for a key that the dispatcher did not suppress.
    ///
    /// Returns `true` if the key changed the document or the caret.
    pub fn apply_native_key(&mut self, key: KeyEvent, clipboard: &mut impl ClipboardSource) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        let accel = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        if accel && matches!(key.code, KeyCode::Char('v' | 'V')) {
            let Some(text) = clipboard.text() else {
                return false;
            };
            let Some(region) = self.region_mut() else {
                return false;
            };
            region.insert_str(&text);
            return true;
        }

        let Some(region) = self.region_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Char(c) if !accel && !alt => region.insert_char(c),
            KeyCode::Enter => region.insert_char('\n'),
            KeyCode::Tab => region.insert_char('\t'),
            KeyCode::Backspace => return region.delete_back(),
            KeyCode::Delete => return region.delete_forward(),
            KeyCode::Left => region.move_caret(Direction::Left),
            KeyCode::Right => region.move_caret(Direction::Right),
            KeyCode::Up => region.move_caret(Direction::Up),
            KeyCode::Down => region.move_caret(Direction::Down),
            KeyCode::Home => region.move_line_start(),
            KeyCode::End => region.move_line_end(),
            _ => return false,
        }
        true
    }

    fn load_markup(&mut self, markup: &str) {
        self.next_document += 1;
        let document = LiveDocument::parse(self.next_document, markup);
        if document.region.is_none() {
            tracing::warn!("loaded document has no editable region");
        }
        self.document = Some(document);
        self.events
            .push_back(SurfaceEvent::DocumentReady(self.next_document));
    }
}

impl std::fmt::Debug for HtmlSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlSurface")
            .field("document", &self.document_id())
            .field("listeners", &self.key_listener_count())
            .finish_non_exhaustive()
    }
}

impl Surface for HtmlSurface {
    fn current_markup(&self) -> String {
        self.document
            .as_ref()
            .map(LiveDocument::markup)
            .unwrap_or_default()
    }

    fn navigate(&mut self, location: &Path) -> Result<(), SurfaceError> {
        let markup = std::fs::read_to_string(location).map_err(|source| SurfaceError::Navigate {
            path: location.to_path_buf(),
            source,
        })?;
        self.load_markup(&markup);
        tracing::debug!(
            document = self.next_document,
            location = %location.display(),
            "surface navigated"
        );
        Ok(())
    }

    fn append_to_editable_region(&mut self, fragment: &str) -> Result<(), SurfaceError> {
        let document = self.document.as_mut().ok_or(SurfaceError::NotLoaded)?;
        let region = document
            .region
            .as_mut()
            .ok_or(SurfaceError::NoEditableRegion)?;
        region.append(fragment);
        Ok(())
    }

    fn subscribe_keys(&mut self) -> Option<Subscription> {
        let document = self.document.as_mut()?;
        self.next_listener += 1;
        let subscription = Subscription {
            document: document.id,
            listener: self.next_listener,
        };
        document.listeners.push(subscription);
        Some(subscription)
    }

    fn is_subscribed(&self, subscription: Subscription) -> bool {
        self.document
            .as_ref()
            .is_some_and(|doc| doc.listeners.contains(&subscription))
    }
}
