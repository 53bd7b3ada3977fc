use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::text::{display_width, truncate_to_width};

const DISMISS_HINT: &str = "Esc dismiss ";

/// One-line banner for the current error notice
pub fn render_error_banner(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = app.state.notice() else {
        return;
    };
    let bg = app.theme.error_bg;
    let width = area.width as usize;
    let hint_width = display_width(DISMISS_HINT);

    let message = format!(" {}", notice.kind.message());
    let room = if width > hint_width + 1 {
        width - hint_width - 1
    } else {
        width
    };
    let message = truncate_to_width(&message, room);
    let used = display_width(&message);

    let mut spans = vec![Span::styled(
        message,
        Style::default()
            .fg(app.theme.red)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    if used + hint_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - hint_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            DISMISS_HINT,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
