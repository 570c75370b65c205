use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::task_ops::MAX_TEXT_LEN;
use crate::tui::app::{App, Mode};

use super::helpers::{edit_window, split_line};

const PROMPT: &str = "+ ";

/// New-task input line, then the inline error and character counter
pub fn render_task_form(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let fill = Style::default().bg(bg);
    let width = area.width as usize;
    let adding = app.mode == Mode::Add;

    let prompt_style = if adding {
        Style::default().fg(app.theme.highlight).bg(bg)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let mut input = vec![Span::styled(PROMPT, prompt_style)];
    let mut cursor_col = None;
    if adding {
        let avail = width.saturating_sub(PROMPT.len());
        let (shown, col) = edit_window(&app.edit_buffer, app.edit_cursor, avail);
        input.push(Span::styled(
            shown.to_string(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        cursor_col = Some(PROMPT.len() + col);
    } else {
        input.push(Span::styled(
            "Add a new task... (a)",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let mut error = Vec::new();
    if let Some(msg) = &app.form_error {
        error.push(Span::styled(
            format!("  {}", msg),
            Style::default().fg(app.theme.red).bg(bg),
        ));
    }
    let mut counter = Vec::new();
    if adding {
        counter.push(Span::styled(
            format!("{}/{} characters", app.edit_buffer.chars().count(), MAX_TEXT_LEN),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let lines = vec![Line::from(input), split_line(error, counter, width, fill)];
    frame.render_widget(Paragraph::new(lines).style(fill), area);

    if let Some(col) = cursor_col
        && col < width
    {
        frame.set_cursor_position(Position::new(area.x + col as u16, area.y));
    }
}
