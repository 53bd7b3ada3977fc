use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Filter;
use crate::tui::app::App;
use crate::util::text::display_width;

const CLEAR_LABEL: &str = "Clear completed";

/// Remaining count, filter tabs, and the clear-completed action
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = vec![Span::styled(
        format!(" {} items left", app.state.active_count()),
        Style::default().fg(app.theme.text).bg(bg),
    )];
    spans.push(Span::styled("   ", Style::default().bg(bg)));

    for (i, filter) in Filter::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ", Style::default().bg(bg)));
        }
        let style = if *filter == app.state.filter() {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(filter.label(), style));
    }

    // Right-aligned; dimmed when there is nothing to clear
    let clear_style = if app.state.has_completed() {
        Style::default().fg(app.theme.text).bg(bg)
    } else {
        Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::DIM)
    };
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let clear_width = display_width(CLEAR_LABEL) + 1;
    if used + clear_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - clear_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(CLEAR_LABEL, clear_style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
