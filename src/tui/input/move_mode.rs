use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::after_mutation;

pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    let last = app.visible_count().saturating_sub(1);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.cursor = (app.cursor + 1).min(last),
        KeyCode::Char('k') | KeyCode::Up => app.cursor = app.cursor.saturating_sub(1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.cursor = last,
        KeyCode::Enter | KeyCode::Char('m') => drop_task(app),
        KeyCode::Esc => {
            if let Some(origin) = app.move_origin.take() {
                app.cursor = origin;
            }
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

/// Commit the move: one reorder from the origin to the cursor.
fn drop_task(app: &mut App) {
    app.mode = Mode::Navigate;
    let Some(origin) = app.move_origin.take() else {
        return;
    };
    let dest = app.cursor;
    if origin == dest {
        return;
    }
    match app.state.reorder_task_list(origin, dest) {
        Ok(()) => {
            let text = app.state.tasks()[dest].text.clone();
            after_mutation(app);
            app.toasts
                .success(format!("\"{}\" moved to position {}", text, dest + 1));
        }
        Err(e) => {
            log::warn!("move {} -> {} refused: {}", origin, dest, e);
            app.toasts.error(e.to_string());
            app.cursor = origin;
            app.clamp_cursor();
        }
    }
}
