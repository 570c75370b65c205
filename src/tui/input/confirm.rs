use crossterm::event::{KeyCode, KeyEvent};

use crate::toast::ToastAction;
use crate::tui::app::{App, Mode};

use super::after_mutation;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            let action = app.toasts.take_confirm();
            app.mode = Mode::Navigate;
            match action {
                Some(ToastAction::ConfirmDelete { id }) => confirm_delete(app, &id),
                Some(ToastAction::ConfirmClearCompleted) => confirm_clear_completed(app),
                Some(ToastAction::Undo(_)) | None => {}
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.toasts.take_confirm();
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

fn confirm_delete(app: &mut App, id: &str) {
    // The task may have gone while the question was open
    let Some(removed) = app.state.delete_task(id) else {
        return;
    };
    after_mutation(app);
    let message = format!("Deleted \"{}\"", removed.text);
    app.toasts.offer_undo(message, vec![removed]);
}

fn confirm_clear_completed(app: &mut App) {
    let removed = app.state.clear_completed();
    if removed.is_empty() {
        app.toasts.warning("No completed tasks to clear!");
        return;
    }
    after_mutation(app);
    let n = removed.len();
    let plural = if n > 1 { "s" } else { "" };
    app.toasts
        .offer_undo(format!("Cleared {} completed task{}", n, plural), removed);
}
