use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::task_ops::{self, MAX_TEXT_LEN, TaskError};
use crate::state::UpdateOutcome;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::after_mutation;

/// Shared by the add form and inline edit: single-line text entry.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => match app.mode {
            Mode::Add => submit_add(app),
            _ => submit_edit(app),
        },
        (_, KeyCode::Esc) => cancel(app),

        // Home / Ctrl+A: jump to start of line
        (_, KeyCode::Home) => app.edit_cursor = 0,
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => app.edit_cursor = 0,
        // End / Ctrl+E: jump to end of line
        (_, KeyCode::End) => app.edit_cursor = app.edit_buffer.len(),
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            app.edit_cursor = app.edit_buffer.len();
        }
        // Kill to start of line
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.drain(..app.edit_cursor);
            app.edit_cursor = 0;
            app.form_error = None;
        }
        (m, KeyCode::Left) if m.contains(KeyModifiers::ALT) => {
            app.edit_cursor = unicode::word_boundary_left(&app.edit_buffer, app.edit_cursor);
        }
        (m, KeyCode::Right) if m.contains(KeyModifiers::ALT) => {
            app.edit_cursor = unicode::word_boundary_right(&app.edit_buffer, app.edit_cursor);
        }
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_cursor = next;
            }
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_buffer.drain(prev..app.edit_cursor);
                app.edit_cursor = prev;
                app.form_error = None;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_buffer.drain(app.edit_cursor..next);
                app.form_error = None;
            }
        }
        (m, KeyCode::Char(c))
            if !m.contains(KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT) =>
        {
            // Form input stops at the length limit
            if app.edit_buffer.chars().count() >= MAX_TEXT_LEN {
                return;
            }
            app.edit_buffer.insert(app.edit_cursor, c);
            app.edit_cursor += c.len_utf8();
            app.form_error = None;
        }
        _ => {}
    }
}

fn report_invalid(app: &mut App, err: &TaskError) {
    let toast = match err {
        TaskError::TooLong { .. } => "Task description is too long!",
        _ => "Task description cannot be empty!",
    };
    app.form_error = Some(err.to_string());
    app.toasts.error(toast);
}

fn submit_add(app: &mut App) {
    let text = match task_ops::validate_task_text(&app.edit_buffer) {
        Ok(text) => text.to_string(),
        Err(e) => {
            report_invalid(app, &e);
            return;
        }
    };
    match app.state.add_task(&text) {
        Ok(task) => {
            let id = task.id.clone();
            after_mutation(app);
            app.toasts.success("Task added successfully!");
            app.clear_edit();
            app.mode = Mode::Navigate;
            app.select_id(&id);
        }
        Err(e) => report_invalid(app, &e),
    }
}

fn submit_edit(app: &mut App) {
    let Some(id) = app.edit_target.clone() else {
        app.clear_edit();
        app.mode = Mode::Navigate;
        return;
    };
    let text = match task_ops::validate_task_text(&app.edit_buffer) {
        Ok(text) => text.to_string(),
        Err(e) => {
            report_invalid(app, &e);
            return;
        }
    };
    match app.state.update_task(&id, &text) {
        Ok(UpdateOutcome::Updated) => after_mutation(app),
        Ok(UpdateOutcome::Unchanged) => {}
        Err(TaskError::NotFound(_)) => {
            log::debug!("edit target {} vanished", id);
        }
        Err(e) => {
            report_invalid(app, &e);
            return;
        }
    }
    app.clear_edit();
    app.mode = Mode::Navigate;
}

fn cancel(app: &mut App) {
    if app.mode == Mode::Edit {
        app.toasts.info("Edit cancelled");
    }
    app.clear_edit();
    app.mode = Mode::Navigate;
}
