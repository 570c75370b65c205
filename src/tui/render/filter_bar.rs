use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Filter;
use crate::tui::app::App;

use super::helpers::split_line;

/// Filter tabs with counts, then the stats line
pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let fill = Style::default().bg(bg);
    let stats = app.state.stats();
    let active = app.state.filter();

    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));
    let mut tabs: Vec<Span> = Vec::new();
    for (i, filter) in Filter::ALL.into_iter().enumerate() {
        if i > 0 {
            tabs.push(sep.clone());
        }
        let style = if filter == active {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        tabs.push(Span::styled(
            format!(" {} ({}) ", filter.label(), stats.count_for(filter)),
            style,
        ));
    }

    let mut clear_hint = Vec::new();
    if stats.completed > 0 {
        clear_hint.push(Span::styled(
            "C clear completed",
            Style::default().fg(app.theme.red).bg(bg),
        ));
    }

    let lines = vec![
        split_line(tabs, clear_hint, area.width as usize, fill),
        Line::from(Span::styled(
            format!(" {}", stats.summary()),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(fill), area);
}
