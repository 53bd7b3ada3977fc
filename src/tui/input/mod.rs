mod edit;
mod navigate;

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use edit::{handle_edit, handle_input, paste_into_edit, paste_into_input};
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay swallows the next key
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Input => handle_input(app, key, now),
        Mode::Edit => handle_edit(app, key),
    }
    app.sync();
}

/// Handle a bracketed paste. Newlines become spaces since both fields are
/// single-line.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    let clean = text.replace(['\r', '\n'], " ");
    match app.mode {
        Mode::Input => paste_into_input(app, &clean),
        Mode::Edit => paste_into_edit(app, &clean),
        Mode::Navigate => {}
    }
    app.sync();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Filter, Item, ItemId, OwnerId, UiConfig};
    use crate::ops::{Completion, Op, Reply, ViewState};

    fn app_with(items: Vec<Item>) -> App {
        let mut state = ViewState::new(OwnerId(1));
        let load = state.load().remove(0);
        state.complete(Completion::ok(load.id, Reply::Items(items)), Instant::now());
        let mut app = App::new(state, &UiConfig::default());
        app.mode = Mode::Navigate;
        app.sync();
        app
    }

    fn item(id: u64, title: &str, completed: bool) -> Item {
        Item {
            id: ItemId(id),
            title: title.into(),
            owner_id: OwnerId(1),
            completed,
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE), Instant::now());
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn ops(app: &mut App) -> Vec<Op> {
        app.take_outbox().into_iter().map(|r| r.op).collect()
    }

    #[test]
    fn navigate_and_toggle() {
        let mut app = app_with(vec![item(1, "a", false), item(2, "b", false)]);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(ops(&mut app), vec![Op::Update(item(2, "b", true))]);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn delete_key() {
        let mut app = app_with(vec![item(1, "a", false)]);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(ops(&mut app), vec![Op::Delete(ItemId(1))]);
        assert!(app.state.is_pending(ItemId(1)));
    }

    #[test]
    fn bulk_keys() {
        let mut app = app_with(vec![item(1, "a", true), item(2, "b", false)]);
        press(&mut app, KeyCode::Char('C'));
        assert_eq!(ops(&mut app), vec![Op::Delete(ItemId(1))]);
        press(&mut app, KeyCode::Char('A'));
        assert_eq!(
            ops(&mut app),
            vec![Op::Update(item(2, "b", true))]
        );
    }

    #[test]
    fn filter_keys_never_send() {
        let mut app = app_with(vec![item(1, "a", true), item(2, "b", false)]);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.state.filter(), Filter::Active);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.state.filter(), Filter::Completed);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.state.filter(), Filter::All);
        assert!(app.take_outbox().is_empty());
    }

    #[test]
    fn type_and_submit_new_item() {
        let mut app = app_with(vec![]);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Input);
        type_str(&mut app, "  Walk dog ");
        assert_eq!(app.state.new_title(), "  Walk dog ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            ops(&mut app),
            vec![Op::Create {
                title: "Walk dog".into(),
                completed: false
            }]
        );
        assert!(app.state.input_disabled());
        // Typing is ignored until the create settles
        type_str(&mut app, "x");
        assert_eq!(app.input.text(), "  Walk dog ");
    }

    #[test]
    fn empty_submit_shows_error_and_typing_clears_it() {
        let mut app = app_with(vec![]);
        app.mode = Mode::Input;
        press(&mut app, KeyCode::Enter);
        assert!(app.take_outbox().is_empty());
        assert!(app.state.error().is_some());
        type_str(&mut app, "x");
        assert!(app.state.error().is_none());
    }

    #[test]
    fn rename_commit_and_cancel() {
        let mut app = app_with(vec![item(1, "old", false)]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Edit);
        assert_eq!(app.edit_field.text(), "old");

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "new");
        press(&mut app, KeyCode::Enter);
        assert_eq!(ops(&mut app), vec![Op::Update(item(1, "new", false))]);
        // Stays in edit mode until the response arrives
        assert_eq!(app.mode, Mode::Edit);

        let mut app = app_with(vec![item(1, "old", false)]);
        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, "er");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.take_outbox().is_empty());
        assert_eq!(app.state.items()[0].title, "old");
    }

    #[test]
    fn unchanged_rename_returns_to_navigate() {
        let mut app = app_with(vec![item(1, "same", false)]);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        assert!(app.take_outbox().is_empty());
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn esc_dismisses_error_in_navigate() {
        let mut app = app_with(vec![]);
        app.state.submit_new(Instant::now());
        press(&mut app, KeyCode::Esc);
        assert!(app.state.error().is_none());
    }

    #[test]
    fn help_overlay_swallows_key() {
        let mut app = app_with(vec![item(1, "a", false)]);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('d'));
        assert!(!app.show_help);
        assert!(app.take_outbox().is_empty());
    }

    #[test]
    fn paste_into_input_flattens_newlines() {
        let mut app = app_with(vec![]);
        app.mode = Mode::Input;
        handle_paste(&mut app, "line one\nline two");
        assert_eq!(app.state.new_title(), "line one line two");
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut app = app_with(vec![]);
        app.mode = Mode::Input;
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(app.should_quit);
    }
}
