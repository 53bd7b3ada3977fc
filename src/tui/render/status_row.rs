use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::text::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let label = match app.mode {
        Mode::Navigate => "",
        Mode::Input => "-- NEW --",
        Mode::Edit => "-- RENAME --",
    };
    let mut spans = vec![Span::styled(
        format!(" {}", label),
        Style::default().fg(app.theme.highlight).bg(bg),
    )];

    if app.show_key_hints {
        let hint = key_hint(app);
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let hint_width = display_width(hint);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn key_hint(app: &App) -> &'static str {
    match app.mode {
        Mode::Navigate => "space toggle  e rename  d delete  a add  ? help ",
        Mode::Input if app.state.input_disabled() => "adding\u{2026}  Esc list ",
        Mode::Input => "Enter add  Esc list ",
        Mode::Edit => "Enter save  Esc cancel ",
    }
}
