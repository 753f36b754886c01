//! Maps activations to session commands.
//!
//! A command can be triggered by a control (button, function key) or by a
//! key combination seen in the surface's own key stream. The dispatcher turns
//! either into at most one [`CommandId`] plus a decision on whether the
//! surface should skip its native handling of the key.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::codec::ClipboardSource;
use crate::session::CommandId;
use crate::surface::{Subscription, Surface};

/// Where an activation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Control(CommandId),
    Key(KeyEvent),
}

/// What to do with one activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub command: Option<CommandId>,
    /// Skip the surface's native handling of the key.
    pub suppress: bool,
}

impl Dispatch {
    /// Nothing to run; let the surface handle the key.
    pub const NATIVE: Self = Self {
        command: None,
        suppress: false,
    };

    const fn run(command: CommandId) -> Self {
        Self {
            command: Some(command),
            suppress: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suppression {
    Always,
    WhenImagePresent,
}

#[derive(Debug, Clone, Copy)]
struct CommandBinding {
    key: char,
    command: CommandId,
    suppression: Suppression,
}

/// Accelerator + letter bindings. Letters are matched case-insensitively.
const BINDINGS: [CommandBinding; 3] = [
    CommandBinding {
        key: 's',
        command: CommandId::Overwrite,
        suppression: Suppression::Always,
    },
    CommandBinding {
        key: 'v',
        command: CommandId::PasteImage,
        suppression: Suppression::WhenImagePresent,
    },
    CommandBinding {
        key: 'o',
        command: CommandId::Open,
        suppression: Suppression::Always,
    },
];

fn is_accelerator(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
        && !modifiers.contains(KeyModifiers::ALT)
}

fn binding_for(key: &KeyEvent) -> Option<CommandBinding> {
    if !is_accelerator(key.modifiers) {
        return None;
    }
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    let c = c.to_ascii_lowercase();
    BINDINGS.iter().copied().find(|binding| binding.key == c)
}

/// The command bound to a key combination, regardless of clipboard state.
pub fn command_for_key(key: &KeyEvent) -> Option<CommandId> {
    binding_for(key).map(|binding| binding.command)
}

/// Owns the key subscription on the surface and routes activations.
#[derive(Debug, Default)]
pub struct CommandDispatcher {
    subscription: Option<Subscription>,
}

impl CommandDispatcher {
    pub const fn new() -> Self {
        Self { subscription: None }
    }

    pub const fn subscription(&self) -> Option<Subscription> {
        self.subscription
    }

    /// Whether key events currently reach this dispatcher.
    pub fn is_listening(&self, surface: &impl Surface) -> bool {
        self.subscription
            .is_some_and(|subscription| surface.is_subscribed(subscription))
    }

    /// The surface finished loading a document.
    ///
    /// Subscribes to the new document's key stream unless already subscribed
    /// to it, so repeated ready notifications never stack listeners.
    /// Returns `true` if a new subscription was made.
    pub fn on_surface_ready(&mut self, surface: &mut impl Surface) -> bool {
        if self.is_listening(surface) {
            return false;
        }
        self.subscription = surface.subscribe_keys();
        tracing::debug!(subscription = ?self.subscription, "key listener attached");
        self.subscription.is_some()
    }

    /// A control was activated. Always runs its command.
    pub const fn on_control(&self, command: CommandId) -> Dispatch {
        Dispatch::run(command)
    }

    /// A key event arrived from the surface.
    ///
    /// Only the initial press of a bound combination yields a command;
    /// auto-repeats keep the press's suppression without running anything
    /// again, and releases are left alone.
    pub fn on_key_event(
        &self,
        surface: &impl Surface,
        key: &KeyEvent,
        clipboard: &mut impl ClipboardSource,
    ) -> Dispatch {
        if !self.is_listening(surface) || key.kind == KeyEventKind::Release {
            return Dispatch::NATIVE;
        }
        let Some(binding) = binding_for(key) else {
            return Dispatch::NATIVE;
        };
        let suppress = match binding.suppression {
            Suppression::Always => true,
            Suppression::WhenImagePresent => clipboard.has_image(),
        };
        let command = (suppress && key.kind == KeyEventKind::Press).then_some(binding.command);
        tracing::debug!(?command, suppress, key = ?key.code, "key dispatched");
        Dispatch { command, suppress }
    }

    pub fn dispatch(
        &self,
        activation: Activation,
        surface: &impl Surface,
        clipboard: &mut impl ClipboardSource,
    ) -> Dispatch {
        match activation {
            Activation::Control(command) => self.on_control(command),
            Activation::Key(key) => self.on_key_event(surface, &key, clipboard),
        }
    }
}
