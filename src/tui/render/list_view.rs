use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::text::{display_width, truncate_to_width};

use super::spinner_glyph;

/// Columns taken by the leading space and the `[x] ` checkbox
const CHECKBOX_COL: usize = 5;

/// Render the visible items plus the create placeholder
pub fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let height = area.height as usize;
    let width = area.width as usize;
    let row_count = app.row_count();

    if row_count == 0 {
        let message = if app.state.is_loading() {
            " Loading\u{2026}".to_string()
        } else if app.state.items().is_empty() {
            " Nothing to do".to_string()
        } else {
            format!(" No {} items", app.state.filter())
        };
        let empty = Paragraph::new(message).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    // Keep the cursor on screen
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }
    app.scroll_offset = app.scroll_offset.min(row_count.saturating_sub(height.max(1)));

    let editing = app.state.edit().map(|d| d.id);
    let spinner = spinner_glyph(app.spinner_frame);
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_pos: Option<(u16, u16)> = None;

    let rows = app.state.rows();
    for (i, row) in rows.iter().enumerate().skip(app.scroll_offset).take(height) {
        let is_cursor = i == app.cursor && app.mode == Mode::Navigate;
        let row_bg = if is_cursor {
            app.theme.selection_bg
        } else {
            bg
        };
        let item = row.item;

        let check_style = if item.completed {
            Style::default().fg(app.theme.green).bg(row_bg)
        } else {
            Style::default().fg(app.theme.dim).bg(row_bg)
        };
        let checkbox = if item.completed { "[x]" } else { "[ ]" };
        let mut spans = vec![
            Span::styled(" ", Style::default().bg(row_bg)),
            Span::styled(checkbox, check_style),
            Span::styled(" ", Style::default().bg(row_bg)),
        ];

        // Leave room for the spinner column
        let title_avail = width.saturating_sub(CHECKBOX_COL + 2);
        let is_editing = !row.placeholder && editing == Some(item.id);
        let title = if is_editing {
            app.edit_field.text()
        } else {
            item.title.as_str()
        };
        let title = truncate_to_width(title, title_avail);

        let title_style = if row.placeholder {
            Style::default()
                .fg(app.theme.dim)
                .bg(row_bg)
                .add_modifier(Modifier::ITALIC)
        } else if is_editing {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(row_bg)
                .add_modifier(Modifier::UNDERLINED)
        } else if item.completed {
            Style::default()
                .fg(app.theme.dim)
                .bg(row_bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else if is_cursor {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };
        let title_width = display_width(&title);
        spans.push(Span::styled(title, title_style));

        if row.pending {
            let pad = width.saturating_sub(CHECKBOX_COL + title_width + 1);
            spans.push(Span::styled(" ".repeat(pad), Style::default().bg(row_bg)));
            spans.push(Span::styled(
                spinner.to_string(),
                Style::default().fg(app.theme.highlight).bg(row_bg),
            ));
        } else if is_cursor {
            let pad = width.saturating_sub(CHECKBOX_COL + title_width);
            spans.push(Span::styled(" ".repeat(pad), Style::default().bg(row_bg)));
        }

        if is_editing && app.mode == Mode::Edit {
            let col = (CHECKBOX_COL + app.edit_field.cursor_col()).min(width.saturating_sub(1));
            let line_idx = lines.len();
            cursor_pos = Some((area.x + col as u16, area.y + line_idx as u16));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);

    if let Some(pos) = cursor_pos
        && !app.show_help
    {
        frame.set_cursor_position(pos);
    }
}
