use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::text::truncate_to_width;

const PLACEHOLDER_TEXT: &str = "What needs to be done?";

/// Width of the toggle-all column, including the space after it
const TOGGLE_COL: u16 = 3;

pub fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default()
        .fg(app.theme.highlight)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(Line::from(Span::styled(" todos", style))), area);
}

/// Toggle-all indicator followed by the new-item field
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans: Vec<Span> = Vec::new();

    // The indicator only exists while there is something to toggle
    if app.state.show_chrome() {
        let color = if app.state.all_completed() {
            app.theme.text_bright
        } else {
            app.theme.dim
        };
        spans.push(Span::styled(" \u{276F} ", Style::default().fg(color).bg(bg)));
    } else {
        spans.push(Span::styled("   ", Style::default().bg(bg)));
    }

    let focused = app.mode == Mode::Input;
    let disabled = app.state.input_disabled();
    let avail = area.width.saturating_sub(TOGGLE_COL + 1) as usize;
    let text = app.input.text();
    if text.is_empty() {
        spans.push(Span::styled(
            PLACEHOLDER_TEXT,
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
    } else {
        let fg = if disabled {
            app.theme.dim
        } else {
            app.theme.text_bright
        };
        spans.push(Span::styled(
            truncate_to_width(text, avail),
            Style::default().fg(fg).bg(bg),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );

    if focused && !disabled && !app.show_help {
        let col = (app.input.cursor_col() as u16).min(avail as u16);
        frame.set_cursor_position((area.x + TOGGLE_COL + col, area.y));
    }
}
