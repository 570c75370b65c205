use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Filter;
use crate::toast::ToastAction;
use crate::tui::app::{App, Mode};

use super::after_mutation;

pub(super) const REORDER_ONLY_IN_ALL: &str = "Reordering is only available in \"All Tasks\" view";

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.should_quit = true;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Cursor
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.visible_count().saturating_sub(1);
        }

        // Task actions
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_selected(app),
        KeyCode::Char('a') => begin_add(app),
        KeyCode::Char('e') | KeyCode::Enter => begin_edit(app),
        KeyCode::Char('d') | KeyCode::Delete => ask_delete(app),
        KeyCode::Char('C') => ask_clear_completed(app),
        KeyCode::Char('m') => begin_move(app),
        KeyCode::Char('u') => undo(app),

        // Filters
        KeyCode::Char(c @ '1'..='3') => {
            let idx = (c as usize) - ('1' as usize);
            change_filter(app, Filter::ALL[idx]);
        }
        KeyCode::Char('f') | KeyCode::Tab => {
            let next = app.state.filter().next();
            change_filter(app, next);
        }

        KeyCode::Char('T') => toggle_theme(app),
        KeyCode::Esc => {
            if let Some(id) = app.toasts.latest().map(|t| t.id) {
                app.toasts.dismiss(id);
            }
        }
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let count = app.visible_count();
    if count == 0 {
        app.cursor = 0;
        return;
    }
    let next = app.cursor.saturating_add_signed(delta);
    app.cursor = next.min(count - 1);
}

fn toggle_selected(app: &mut App) {
    let Some(id) = app.cursor_task().map(|t| t.id.clone()) else {
        return;
    };
    if app.state.toggle_task(&id).is_some() {
        after_mutation(app);
    }
}

fn begin_add(app: &mut App) {
    app.clear_edit();
    app.mode = Mode::Add;
}

fn begin_edit(app: &mut App) {
    let Some((id, text)) = app.cursor_task().map(|t| (t.id.clone(), t.text.clone())) else {
        return;
    };
    app.clear_edit();
    app.edit_cursor = text.len();
    app.edit_buffer = text;
    app.edit_target = Some(id);
    app.mode = Mode::Edit;
}

fn ask_delete(app: &mut App) {
    let Some((id, text)) = app.cursor_task().map(|t| (t.id.clone(), t.text.clone())) else {
        return;
    };
    app.toasts.confirm(
        format!("Delete task \"{}\"?", text),
        ToastAction::ConfirmDelete { id },
    );
    app.mode = Mode::Confirm;
}

fn ask_clear_completed(app: &mut App) {
    let completed = app.state.stats().completed;
    if completed == 0 {
        app.toasts.warning("No completed tasks to clear!");
        return;
    }
    let plural = if completed > 1 { "s" } else { "" };
    app.toasts.confirm(
        format!("Clear {} completed task{}?", completed, plural),
        ToastAction::ConfirmClearCompleted,
    );
    app.mode = Mode::Confirm;
}

fn begin_move(app: &mut App) {
    if app.state.filter() != Filter::All {
        app.toasts.warning(REORDER_ONLY_IN_ALL);
        return;
    }
    let Some(task) = app.cursor_task() else {
        return;
    };
    let message = format!("Moving \"{}\"", task.text);
    app.move_origin = Some(app.cursor);
    app.toasts.info(message);
    app.mode = Mode::Move;
}

fn undo(app: &mut App) {
    let Some(tasks) = app.toasts.take_undo() else {
        return;
    };
    let first = tasks.first().map(|t| t.id.clone());
    let restored = app.state.restore_tasks(tasks);
    if restored == 0 {
        return;
    }
    if let Some(id) = first {
        app.select_id(&id);
    }
    let plural = if restored > 1 { "s" } else { "" };
    app.toasts.success(format!("Restored {} task{}", restored, plural));
}

fn change_filter(app: &mut App, filter: Filter) {
    app.state.set_filter(filter);
    app.cursor = 0;
    app.scroll_offset = 0;
    app.toasts.info(filter.showing_message());
}

fn toggle_theme(app: &mut App) {
    let next = app.state.theme().toggled();
    app.state.set_theme(next);
    app.apply_theme();
}
