use crate::app::{Editor, Message};
use crate::codec::ClipboardSource;
use crate::dispatch::{Activation, Dispatch};
use crate::session::{HostShell, Outcome};

/// Run the command and surface work that `update` leaves out.
///
/// Controls always reach the session. Surface keys are offered to the
/// dispatcher first; a key it does not suppress gets the surface's native
/// handling. Returns the outcome of the command that ran, if any.
pub fn handle_message_side_effects(
    editor: &mut Editor,
    shell: &mut impl HostShell,
    clipboard: &mut impl ClipboardSource,
    msg: &Message,
) -> Option<Outcome> {
    let outcome = match msg {
        Message::Control(command) => {
            let dispatch = editor.dispatcher.dispatch(
                Activation::Control(*command),
                &editor.surface,
                clipboard,
            );
            run_command(editor, shell, clipboard, dispatch)
        }
        Message::SurfaceKey(key) => {
            let dispatch =
                editor
                    .dispatcher
                    .dispatch(Activation::Key(*key), &editor.surface, clipboard);
            let outcome = run_command(editor, shell, clipboard, dispatch);
            if !dispatch.suppress {
                editor.surface.apply_native_key(*key, clipboard);
            }
            outcome
        }
        _ => None,
    };
    editor.pump_surface_events();
    outcome
}

fn run_command(
    editor: &mut Editor,
    shell: &mut impl HostShell,
    clipboard: &mut impl ClipboardSource,
    dispatch: Dispatch,
) -> Option<Outcome> {
    let command = dispatch.command?;
    editor
        .session
        .execute(command, &mut editor.surface, shell, clipboard)
}
