use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

const KEY_WIDTH: usize = 14;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let sections: [(&str, &[(&str, &str)]); 4] = [
        (
            " List",
            &[
                (" \u{2191}\u{2193}/jk", "Move cursor"),
                (" g/G", "Jump to top/bottom"),
                (" space/x", "Toggle completed"),
                (" Enter/e", "Rename"),
                (" d/Del", "Delete"),
            ],
        ),
        (
            " Bulk",
            &[(" A", "Toggle all"), (" C", "Clear completed")],
        ),
        (
            " Filter",
            &[
                (" 1/2/3", "All / Active / Completed"),
                (" f/Tab", "Next filter"),
            ],
        ),
        (
            " Global",
            &[
                (" a/i/n", "New item"),
                (" Esc", "Back / dismiss error"),
                (" ?", "Toggle this help"),
                (" q", "Quit"),
            ],
        ),
    ];

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Key Bindings", header_style)),
        Line::from(""),
    ];
    for (i, (title, bindings)) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(*title, header_style)));
        for (key, desc) in bindings.iter() {
            add_binding(&mut lines, key, desc, key_style, desc_style);
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    lines.push(Line::from(vec![
        Span::styled(format!("{:<width$}", key, width = KEY_WIDTH), key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn lists_bindings() {
        let app = app_with_items(vec![]);
        let output = render_to_string(80, 30, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(output.contains("Key Bindings"));
        assert!(output.contains("Clear completed"));
        assert!(output.contains("Toggle all"));
    }

    #[test]
    fn centered_rect_is_inside_parent() {
        let area = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 80, area);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 40);
        assert_eq!(inner.x, 20);
        assert_eq!(inner.y, 5);
    }
}
