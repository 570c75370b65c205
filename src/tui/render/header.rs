use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::ThemeMode;
use crate::tui::app::App;

use super::helpers::split_line;

/// Title, tagline and theme indicator
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let fill = Style::default().bg(bg);

    let title = vec![Span::styled(
        "Task Manager",
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let mode = match app.theme.mode {
        ThemeMode::Dark => "theme: dark",
        ThemeMode::Light => "theme: light",
    };
    let indicator = vec![Span::styled(mode, Style::default().fg(app.theme.dim).bg(bg))];

    let lines = vec![
        split_line(title, indicator, area.width as usize, fill),
        Line::from(Span::styled(
            "Stay organized and productive",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(fill), area);
}
