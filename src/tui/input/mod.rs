mod confirm;
mod edit;
mod move_mode;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

use confirm::handle_confirm;
use edit::handle_edit;
use move_mode::handle_move;
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Add | Mode::Edit => handle_edit(app, key),
        Mode::Move => handle_move(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}

/// Bookkeeping after any change to the collection: an older undo offer
/// would now restore into a different list, so it is withdrawn.
fn after_mutation(app: &mut App) {
    app.toasts.drop_undo();
    app.clamp_cursor();
}
