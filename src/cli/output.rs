use serde::Serialize;

use crate::model::{Filter, Item};
use crate::ops::ViewState;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub filter: Filter,
    pub active: usize,
    pub items: Vec<&'a Item>,
}

pub fn list_to_json(state: &ViewState) -> ListJson<'_> {
    ListJson {
        filter: state.filter(),
        active: state.active_count(),
        items: state.visible_items().collect(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

pub fn format_item_line(item: &Item) -> String {
    let check = if item.completed { 'x' } else { ' ' };
    format!("[{}] {} {}", check, item.id, item.title)
}

/// Visible items followed by the remaining count
pub fn format_list(state: &ViewState) -> Vec<String> {
    let mut lines: Vec<String> = state.visible_items().map(format_item_line).collect();
    if state.items().is_empty() {
        lines.push("Nothing to do".to_string());
    } else if lines.is_empty() {
        lines.push(format!("No {} items", state.filter()));
    }
    lines.push(format!("{} items left", state.active_count()));
    lines
}
