use std::time::Instant;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Item, ItemId, OwnerId, UiConfig};
use crate::ops::{Completion, Reply, ViewState};
use crate::tui::app::{App, Mode};

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn item(id: u64, title: &str, completed: bool) -> Item {
    Item {
        id: ItemId(id),
        title: title.to_string(),
        owner_id: OwnerId(1),
        completed,
    }
}

/// An app whose initial load already returned `items`, in navigate mode.
pub fn app_with_items(items: Vec<Item>) -> App {
    let mut state = ViewState::new(OwnerId(1));
    let load = state.load().remove(0);
    state.complete(Completion::ok(load.id, Reply::Items(items)), Instant::now());
    let mut app = App::new(state, &UiConfig::default());
    app.mode = Mode::Navigate;
    app.sync();
    app
}
