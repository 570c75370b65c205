use chrono::{DateTime, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store::{MemoryBackend, Store, TASKS_SLOT};
use crate::model::{Config, Task};
use crate::state::TaskState;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An App over an in-memory store, with tasks added in order.
pub fn app_with(texts: &[&str]) -> App {
    let mut state = TaskState::load(Store::new(MemoryBackend::new()));
    for text in texts {
        state.add_task(text).unwrap();
    }
    App::new(state, Config::default())
}

/// An App whose store already holds exactly these tasks.
pub fn app_with_tasks(tasks: Vec<Task>) -> App {
    let backend = MemoryBackend::new();
    backend.insert_raw(TASKS_SLOT, &serde_json::to_string(&tasks).unwrap());
    let state = TaskState::load(Store::new(backend));
    App::new(state, Config::default())
}

pub fn task_at(id: &str, text: &str, completed: bool, created_at: DateTime<Utc>) -> Task {
    Task {
        id: id.into(),
        text: text.into(),
        completed,
        created_at,
    }
}
