use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Filter;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.state.dismiss_error(),

        // Cursor
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.cursor = app.row_count().saturating_sub(1),

        // Focus the new-item field
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Char('n') => app.mode = Mode::Input,

        // Item actions
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(id) = app.cursor_item() {
                let requests = app.state.toggle(id);
                app.send(requests);
            }
        }
        KeyCode::Enter | KeyCode::Char('e') => begin_rename(app),
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.cursor_item() {
                let requests = app.state.delete(id);
                app.send(requests);
            }
        }

        // Bulk actions
        KeyCode::Char('A') => {
            let requests = app.state.toggle_all();
            app.send(requests);
        }
        KeyCode::Char('C') => {
            let requests = app.state.clear_completed();
            app.send(requests);
        }

        // Filters
        KeyCode::Char('1') => app.state.set_filter(Filter::All),
        KeyCode::Char('2') => app.state.set_filter(Filter::Active),
        KeyCode::Char('3') => app.state.set_filter(Filter::Completed),
        KeyCode::Char('f') | KeyCode::Tab => {
            let next = app.state.filter().next();
            app.state.set_filter(next);
        }
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let count = app.row_count();
    if count == 0 {
        return;
    }
    let target = app.cursor.saturating_add_signed(delta);
    app.cursor = target.min(count - 1);
}

fn begin_rename(app: &mut App) {
    let Some(id) = app.cursor_item() else {
        return;
    };
    if app.state.begin_rename(id)
        && let Some(draft) = app.state.edit()
    {
        app.edit_field.set(&draft.text);
        app.mode = Mode::Edit;
    }
}
