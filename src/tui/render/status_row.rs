use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::split_line;

/// Render the status row (bottom of screen): the current toast, or key hints
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let fill = Style::default().bg(bg);
    let width = area.width as usize;

    // An open question outranks newer toasts
    let toast = match app.mode {
        Mode::Confirm => app.toasts.pending_confirm(),
        _ => app.toasts.latest(),
    };

    let line = if let Some(toast) = toast {
        let color = app.theme.severity_color(toast.severity);
        let left = vec![
            Span::styled(
                format!(" {} ", toast.severity.label()),
                Style::default()
                    .fg(bg)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}", toast.message), Style::default().fg(color).bg(bg)),
        ];
        let hints: Vec<&str> = toast.actions.iter().map(|a| a.key_hint()).collect();
        let right = if hints.is_empty() {
            Vec::new()
        } else {
            vec![Span::styled(
                hints.join("  "),
                Style::default().fg(app.theme.text_bright).bg(bg),
            )]
        };
        split_line(left, right, width, fill)
    } else if app.config.ui.show_key_hints {
        Line::from(Span::styled(
            key_hints(app.mode),
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    } else {
        Line::default()
    };

    frame.render_widget(Paragraph::new(line).style(fill), area);
}

fn key_hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => {
            "a add  e edit  space toggle  d delete  m move  C clear  1-3 filter  u undo  T theme  q quit"
        }
        Mode::Add | Mode::Edit => "Enter save  Esc cancel",
        Mode::Move => "j/k move  Enter drop  Esc cancel",
        Mode::Confirm => "y yes  n cancel",
    }
}
