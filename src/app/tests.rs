use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tempfile::tempdir;

use super::{App, Message, Model, handle_message_side_effects, update};
use crate::codec::Bitmap;
use crate::session::{APP_TITLE, CommandId, NoticeLevel, Outcome, SessionState};
use crate::surface::Surface;
use crate::testing::{FakeClipboard, ScriptedShell, started_model};

fn create_test_model(dir: &std::path::Path) -> Model {
    started_model(dir, (80, 24))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Up(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn image_clipboard() -> FakeClipboard {
    FakeClipboard::with_image(Bitmap::solid(2, 2, [255, 0, 0, 255]))
}

fn write_page(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("<html><body><div id=\"editor\">{body}</div></body></html>"))
        .unwrap();
    path
}

// --- update ---

#[test]
fn test_toggle_help_changes_visibility() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    assert!(!model.help_visible);
    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_scroll_is_clamped_to_region() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    // bootstrap region spans two lines
    let model = update(model, Message::ScrollDown(50));
    assert_eq!(model.scroll_offset, 1);
    let model = update(model, Message::ScrollUp(10));
    assert_eq!(model.scroll_offset, 0);
}

#[test]
fn test_resize_and_quit() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    let model = update(model, Message::Resize(100, 40));
    assert_eq!(model.terminal_size, (100, 40));
    assert!(!model.should_quit);
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_commands_do_not_change_view_state() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    let model = update(model, Message::Control(CommandId::Save));
    assert_eq!(model.scroll_offset, 0);
    assert!(!model.should_quit);
    assert_eq!(model.chrome.title, APP_TITLE);
}

#[test]
fn test_follow_caret_scrolls_to_caret_line() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path());
    let body = "line\n".repeat(30);
    model
        .editor
        .surface
        .append_to_editable_region(&body)
        .unwrap();
    let mut clipboard = FakeClipboard::empty();
    for _ in 0..25 {
        model
            .editor
            .surface
            .apply_native_key(key(KeyCode::Down), &mut clipboard);
    }
    model.follow_caret(10);
    assert_eq!(model.scroll_offset, 16);
    for _ in 0..25 {
        model
            .editor
            .surface
            .apply_native_key(key(KeyCode::Up), &mut clipboard);
    }
    model.follow_caret(10);
    assert_eq!(model.scroll_offset, 0);
}

// --- input ---

#[test]
fn test_function_keys_map_to_controls() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    let app = App::new();
    let cases = [
        (2, CommandId::Save),
        (3, CommandId::Overwrite),
        (4, CommandId::PasteImage),
        (5, CommandId::Open),
    ];
    for (n, command) in cases {
        assert_eq!(
            app.handle_key(key(KeyCode::F(n)), &model),
            Some(Message::Control(command))
        );
    }
}

#[test]
fn test_ctrl_q_quits_and_f1_toggles_help() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    let app = App::new();
    assert_eq!(app.handle_key(ctrl('q'), &model), Some(Message::Quit));
    assert_eq!(
        app.handle_key(key(KeyCode::F(1)), &model),
        Some(Message::ToggleHelp)
    );
}

#[test]
fn test_shortcuts_and_typing_go_to_the_surface() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    let app = App::new();
    for event in [ctrl('s'), ctrl('o'), ctrl('v'), key(KeyCode::Char('a'))] {
        assert_eq!(
            app.handle_key(event, &model),
            Some(Message::SurfaceKey(event))
        );
    }
}

#[test]
fn test_host_key_release_is_ignored() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    let app = App::new();
    let mut release = key(KeyCode::F(2));
    release.kind = KeyEventKind::Release;
    assert_eq!(app.handle_key(release, &model), None);
}

#[test]
fn test_any_key_closes_help() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path());
    model.help_visible = true;
    let app = App::new();
    assert_eq!(app.handle_key(ctrl('s'), &model), Some(Message::HideHelp));
}

#[test]
fn test_page_keys_scroll() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    let app = App::new();
    assert_eq!(
        app.handle_key(key(KeyCode::PageDown), &model),
        Some(Message::ScrollDown(20))
    );
    assert_eq!(
        app.handle_key(key(KeyCode::PageUp), &model),
        Some(Message::ScrollUp(20))
    );
}

#[test]
fn test_clicking_control_bar_buttons() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    let app = App::new();
    // control bar sits above the status bar on a 24-row screen
    assert_eq!(
        app.handle_mouse(click(1, 22), &model),
        Some(Message::Control(CommandId::Save))
    );
    assert_eq!(
        app.handle_mouse(click(12, 22), &model),
        Some(Message::Control(CommandId::Overwrite))
    );
    assert_eq!(app.handle_mouse(click(1, 5), &model), None);
}

#[test]
fn test_mouse_disabled_ignores_clicks() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    let app = App::new().with_mouse(false);
    assert_eq!(app.handle_mouse(click(1, 22), &model), None);
}

#[test]
fn test_wheel_scrolls_document() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    let app = App::new();
    let wheel = MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 10,
        row: 5,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(app.handle_mouse(wheel, &model), Some(Message::ScrollDown(3)));
}

#[test]
fn test_resize_event_maps_to_message() {
    let dir = tempdir().unwrap();
    let model = create_test_model(dir.path());
    let app = App::new();
    assert_eq!(
        app.handle_event(&Event::Resize(120, 50), &model),
        Some(Message::Resize(120, 50))
    );
}

// --- side effects ---

#[test]
fn test_ctrl_s_while_unsaved_prompts_for_destination() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path());
    let target = dir.path().join("out.html");
    let mut shell = ScriptedShell::new().answer_save(Some(target.clone()));

    let outcome = handle_message_side_effects(
        &mut model.editor,
        &mut shell,
        &mut FakeClipboard::empty(),
        &Message::SurfaceKey(ctrl('s')),
    );

    assert_eq!(outcome, Some(Outcome::Saved(target.clone())));
    assert_eq!(shell.save_prompts, 1);
    assert_eq!(
        std::fs::read_to_string(&target).unwrap(),
        model.editor.surface.current_markup()
    );
    assert_eq!(model.editor.session.state(), SessionState::Bound(&target));
    assert_eq!(shell.titles, vec![format!("out.html - {APP_TITLE}")]);
}

#[test]
fn test_suppressed_shortcut_is_not_typed() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path());
    let before = model.editor.surface.current_markup();
    let mut shell = ScriptedShell::new();
    handle_message_side_effects(
        &mut model.editor,
        &mut shell,
        &mut FakeClipboard::empty(),
        &Message::SurfaceKey(ctrl('s')),
    );
    // cancelled prompt: nothing written, nothing typed, no notice
    assert_eq!(model.editor.surface.current_markup(), before);
    assert!(shell.notices.is_empty());
}

#[test]
fn test_single_save_after_open_runs_once() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path());
    let page = write_page(dir.path(), "page.html", "hello");
    let mut shell = ScriptedShell::new().answer_open(Some(page.clone()));
    let mut clipboard = FakeClipboard::empty();

    handle_message_side_effects(
        &mut model.editor,
        &mut shell,
        &mut clipboard,
        &Message::SurfaceKey(ctrl('o')),
    );
    assert_eq!(model.editor.surface.key_listener_count(), 1);
    assert!(model.editor.dispatcher.is_listening(&model.editor.surface));

    handle_message_side_effects(
        &mut model.editor,
        &mut shell,
        &mut clipboard,
        &Message::SurfaceKey(ctrl('s')),
    );
    let overwrites = shell
        .notices
        .iter()
        .filter(|(_, text)| text.starts_with("Overwrote"))
        .count();
    assert_eq!(overwrites, 1);
    assert_eq!(shell.save_prompts, 0);
}

#[test]
fn test_repeated_opens_never_stack_listeners() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path());
    let first = write_page(dir.path(), "one.html", "1");
    let second = write_page(dir.path(), "two.html", "2");
    let mut shell = ScriptedShell::new()
        .answer_open(Some(first))
        .answer_open(Some(second));
    let mut clipboard = FakeClipboard::empty();
    for _ in 0..2 {
        handle_message_side_effects(
            &mut model.editor,
            &mut shell,
            &mut clipboard,
            &Message::Control(CommandId::Open),
        );
        assert_eq!(model.editor.surface.key_listener_count(), 1);
    }
    assert!(model.editor.surface.current_markup().contains(">2</div>"));
}

#[test]
fn test_ctrl_v_with_image_appends_image() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path());
    let mut shell = ScriptedShell::new();
    let outcome = handle_message_side_effects(
        &mut model.editor,
        &mut shell,
        &mut image_clipboard(),
        &Message::SurfaceKey(ctrl('v')),
    );
    assert!(matches!(outcome, Some(Outcome::ImagePasted { .. })));
    let markup = model.editor.surface.current_markup();
    assert!(markup.contains("<img src=\"data:image/png;base64,"));
    assert_eq!(
        shell.last_notice(),
        Some(&(NoticeLevel::Info, "Image pasted".to_string()))
    );
}

#[test]
fn test_ctrl_v_without_image_pastes_text_natively() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path());
    let mut shell = ScriptedShell::new();
    let outcome = handle_message_side_effects(
        &mut model.editor,
        &mut shell,
        &mut FakeClipboard::with_text("plain"),
        &Message::SurfaceKey(ctrl('v')),
    );
    assert_eq!(outcome, None);
    assert!(shell.notices.is_empty());
    assert!(model.editor.surface.current_markup().contains("plain"));
}

#[test]
fn test_paste_control_without_image_warns() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path());
    let before = model.editor.surface.current_markup();
    let mut shell = ScriptedShell::new();
    handle_message_side_effects(
        &mut model.editor,
        &mut shell,
        &mut FakeClipboard::empty(),
        &Message::Control(CommandId::PasteImage),
    );
    assert_eq!(model.editor.surface.current_markup(), before);
    assert_eq!(
        shell.last_notice(),
        Some(&(NoticeLevel::Warning, "Clipboard has no image".to_string()))
    );
}

#[test]
fn test_typing_edits_region_and_is_saved() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path());
    let mut clipboard = FakeClipboard::empty();
    let mut shell = ScriptedShell::new();
    for c in "Hi".chars() {
        handle_message_side_effects(
            &mut model.editor,
            &mut shell,
            &mut clipboard,
            &Message::SurfaceKey(key(KeyCode::Char(c))),
        );
    }
    let target = dir.path().join("typed.html");
    let mut shell = ScriptedShell::new().answer_save(Some(target.clone()));
    handle_message_side_effects(
        &mut model.editor,
        &mut shell,
        &mut clipboard,
        &Message::Control(CommandId::Save),
    );
    let saved = std::fs::read_to_string(&target).unwrap();
    assert!(saved.contains("contenteditable='true'>Hi\n"));
}

#[test]
fn test_view_messages_have_no_side_effects() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path());
    let mut shell = ScriptedShell::new();
    let outcome = handle_message_side_effects(
        &mut model.editor,
        &mut shell,
        &mut FakeClipboard::empty(),
        &Message::ScrollDown(1),
    );
    assert_eq!(outcome, None);
    assert_eq!(shell.save_prompts + shell.open_prompts, 0);
    assert!(shell.notices.is_empty());
}
