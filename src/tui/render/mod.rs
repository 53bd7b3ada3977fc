pub mod error_banner;
pub mod footer;
pub mod header;
pub mod help_overlay;
pub mod list_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Braille spinner frames for rows awaiting a response
const SPINNER: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];

pub(super) fn spinner_glyph(frame: usize) -> char {
    SPINNER[frame % SPINNER.len()]
}

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let footer_height = if app.state.show_chrome() { 1 } else { 0 };
    let banner_height = if app.state.notice().is_some() { 1 } else { 0 };

    // title | header | gap | list | footer | error banner | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(footer_height),
            Constraint::Length(banner_height),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_title(frame, app, chunks[0]);
    header::render_header(frame, app, chunks[1]);
    list_view::render_list(frame, app, chunks[3]);
    if footer_height > 0 {
        footer::render_footer(frame, app, chunks[4]);
    }
    if banner_height > 0 {
        error_banner::render_error_banner(frame, app, chunks[5]);
    }
    status_row::render_status_row(frame, app, chunks[6]);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}
