pub mod filter_bar;
pub mod header;
mod helpers;
pub mod status_row;
pub mod task_form;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Draw every region of the screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title + tagline + gap
            Constraint::Length(3), // filter tabs + stats + gap
            Constraint::Length(3), // form + error/counter + gap
            Constraint::Min(1),    // task list
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    filter_bar::render_filter_bar(frame, app, chunks[1]);
    task_form::render_task_form(frame, app, chunks[2]);
    task_list::render_task_list(frame, app, chunks[3]);
    status_row::render_status_row(frame, app, chunks[4]);
}
