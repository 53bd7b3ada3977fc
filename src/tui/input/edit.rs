use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::text::TextField;

/// Apply a line-editing key to a field. Returns true if the text changed.
fn edit_field(field: &mut TextField, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('a') if ctrl => {
            field.move_home();
            false
        }
        KeyCode::Char('e') if ctrl => {
            field.move_end();
            false
        }
        KeyCode::Char('u') if ctrl => {
            let had_text = field.cursor() > 0;
            field.delete_to_start();
            had_text
        }
        KeyCode::Char(c) if !ctrl => {
            field.insert_char(c);
            true
        }
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => {
            field.move_left();
            false
        }
        KeyCode::Right => {
            field.move_right();
            false
        }
        KeyCode::Home => {
            field.move_home();
            false
        }
        KeyCode::End => {
            field.move_end();
            false
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// New-item field

pub(super) fn handle_input(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc | KeyCode::Tab | KeyCode::Down => app.mode = Mode::Navigate,
        KeyCode::Enter => {
            let requests = app.state.submit_new(now);
            app.send(requests);
        }
        _ => {
            // The field is disabled while a create is in flight
            if app.state.input_disabled() {
                return;
            }
            if edit_field(&mut app.input, key) {
                app.state.set_new_title(app.input.text());
            }
        }
    }
}

pub(super) fn paste_into_input(app: &mut App, text: &str) {
    if app.state.input_disabled() {
        return;
    }
    for c in text.chars() {
        app.input.insert_char(c);
    }
    app.state.set_new_title(app.input.text());
}

// ---------------------------------------------------------------------------
// Inline rename

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.state.cancel_rename(),
        // Enter, or moving focus away, commits
        KeyCode::Enter | KeyCode::Tab => {
            let requests = app.state.commit_rename();
            app.send(requests);
        }
        _ => {
            if draft_locked(app) {
                return;
            }
            if edit_field(&mut app.edit_field, key) {
                app.state.set_draft(app.edit_field.text());
            }
        }
    }
}

pub(super) fn paste_into_edit(app: &mut App, text: &str) {
    if draft_locked(app) {
        return;
    }
    for c in text.chars() {
        app.edit_field.insert_char(c);
    }
    app.state.set_draft(app.edit_field.text());
}

/// A committed draft is frozen until its response arrives
fn draft_locked(app: &App) -> bool {
    app.state.edit().is_none_or(|draft| draft.submitted)
}
