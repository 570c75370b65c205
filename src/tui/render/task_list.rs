use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Filter, Task};
use crate::ops::task_ops;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::{edit_window, split_line};

/// Marker + checkbox before the text
const GUTTER: usize = 6;

pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let count = app.visible_count();

    if count == 0 {
        let msg = format!("  {}", app.state.filter().empty_message());
        let empty = Paragraph::new(msg).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    // Reorder hint takes the first row when reordering is possible
    let hint = match app.mode {
        Mode::Move => Some("  j/k pick a position, Enter drop, Esc cancel"),
        _ if app.state.filter() == Filter::All && count > 1 => {
            Some("  Press m on a task to move it up or down the list")
        }
        _ => None,
    };
    let hint_rows = usize::from(hint.is_some());
    let visible_height = (area.height as usize).saturating_sub(hint_rows).max(1);

    // Keep the cursor on screen
    app.cursor = app.cursor.min(count - 1);
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor + 1 - visible_height;
    }

    let mut lines: Vec<Line> = Vec::new();
    if let Some(text) = hint {
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    let mut cursor_pos = None;
    let tasks = app.visible_tasks();
    for (i, task) in tasks
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible_height)
    {
        let is_cursor = i == app.cursor;
        let editing = app.mode == Mode::Edit
            && is_cursor
            && app.edit_target.as_deref() == Some(task.id.as_str());
        if editing {
            let avail = width.saturating_sub(GUTTER);
            let (shown, col) = edit_window(&app.edit_buffer, app.edit_cursor, avail);
            let row = area.y + lines.len() as u16;
            lines.push(edit_line(app, task, shown));
            if GUTTER + col < width {
                cursor_pos = Some(Position::new(area.x + (GUTTER + col) as u16, row));
            }
        } else {
            lines.push(task_line(app, task, is_cursor, width));
        }
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
    if let Some(pos) = cursor_pos {
        frame.set_cursor_position(pos);
    }
}

fn row_bg(app: &App, is_cursor: bool) -> ratatui::style::Color {
    match (app.mode, is_cursor) {
        (Mode::Move, true) => app.theme.move_bg,
        (_, true) => app.theme.selection_bg,
        _ => app.theme.background,
    }
}

fn gutter<'a>(app: &App, task: &Task, is_cursor: bool, bg: ratatui::style::Color) -> Vec<Span<'a>> {
    let marker = match (app.mode, is_cursor) {
        (Mode::Move, true) => "\u{2261} ",
        (_, true) => "\u{25B8} ",
        _ => "  ",
    };
    let (check, check_color) = if task.completed {
        ("[x] ", app.theme.green)
    } else {
        ("[ ] ", app.theme.dim)
    };
    vec![
        Span::styled(marker, Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(check, Style::default().fg(check_color).bg(bg)),
    ]
}

fn task_line<'a>(app: &App, task: &Task, is_cursor: bool, width: usize) -> Line<'a> {
    let bg = row_bg(app, is_cursor);
    let mut left = gutter(app, task, is_cursor, bg);

    let created = format!("Created {}", task_ops::format_date(&task.created_at));
    let created_w = unicode::display_width(&created);
    // Date goes first when space is short
    let show_date = width >= GUTTER + created_w + 2 + 8;
    let text_avail = if show_date {
        width - GUTTER - created_w - 2
    } else {
        width.saturating_sub(GUTTER)
    };

    let mut text_style = Style::default().bg(bg);
    text_style = if task.completed {
        text_style
            .fg(app.theme.dim)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if is_cursor {
        text_style.fg(app.theme.text_bright)
    } else {
        text_style.fg(app.theme.text)
    };
    left.push(Span::styled(
        unicode::truncate_to_width(&task.text, text_avail),
        text_style,
    ));

    let right = if show_date {
        vec![
            Span::styled(created, Style::default().fg(app.theme.dim).bg(bg)),
            Span::styled(" ", Style::default().bg(bg)),
        ]
    } else {
        Vec::new()
    };
    split_line(left, right, width, Style::default().bg(bg))
}

fn edit_line<'a>(app: &App, task: &Task, shown: &str) -> Line<'a> {
    let bg = app.theme.selection_bg;
    let mut spans = gutter(app, task, true, bg);
    spans.push(Span::styled(
        shown.to_string(),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::UNDERLINED),
    ));
    Line::from(spans)
}
