use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io;
use crate::io::store::Store;
use crate::model::{Config, Task};
use crate::state::TaskState;
use crate::toast::Toasts;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task into the form
    Add,
    /// Editing the text of `edit_target` in place
    Edit,
    /// Carrying the task at `move_origin`; the cursor is the drop position
    Move,
    /// A yes/no toast is open
    Confirm,
}

/// Main application state
pub struct App {
    pub state: TaskState,
    pub toasts: Toasts,
    pub config: Config,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the visible list
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    /// Form or inline edit text
    pub edit_buffer: String,
    /// Byte offset into `edit_buffer`
    pub edit_cursor: usize,
    /// Id of the task being edited in Edit mode
    pub edit_target: Option<String>,
    /// Inline validation message under the form
    pub form_error: Option<String>,
    /// Full-list index of the task being moved
    pub move_origin: Option<usize>,
}

impl App {
    pub fn new(state: TaskState, config: Config) -> Self {
        let theme = Theme::from_config(state.theme(), &config.ui);
        let toasts = Toasts::new(config.notify.clone());
        App {
            state,
            toasts,
            config,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            edit_buffer: String::new(),
            edit_cursor: 0,
            edit_target: None,
            form_error: None,
            move_origin: None,
        }
    }

    /// Tasks in display order. While moving, the carried task is shown at
    /// the cursor.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let tasks = self.state.tasks();
        match self.move_origin {
            Some(origin) if origin < tasks.len() => {
                let mut order: Vec<&Task> = tasks.iter().collect();
                let carried = order.remove(origin);
                let dest = self.cursor.min(order.len());
                order.insert(dest, carried);
                order
            }
            _ => self.state.filtered_tasks(),
        }
    }

    pub fn visible_count(&self) -> usize {
        match self.move_origin {
            Some(_) => self.state.tasks().len(),
            None => self.state.filtered_tasks().len(),
        }
    }

    pub fn cursor_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.cursor).copied()
    }

    /// Keep the cursor on a real row after the list shrinks.
    pub fn clamp_cursor(&mut self) {
        let count = self.visible_count();
        self.cursor = if count == 0 {
            0
        } else {
            self.cursor.min(count - 1)
        };
    }

    /// Put the cursor on the task with `id` if it is visible.
    pub fn select_id(&mut self, id: &str) {
        if let Some(idx) = self.visible_tasks().iter().position(|t| t.id == id) {
            self.cursor = idx;
        }
    }

    /// Rebuild the palette after the theme slot changes.
    pub fn apply_theme(&mut self) {
        self.theme = Theme::from_config(self.state.theme(), &self.config.ui);
    }

    /// Reset the form/edit buffer.
    pub fn clear_edit(&mut self) {
        self.edit_buffer.clear();
        self.edit_cursor = 0;
        self.edit_target = None;
        self.form_error = None;
    }
}

/// Run the TUI application
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::read_config(data_dir)?;
    let state = TaskState::load(Store::open_dir(data_dir));
    let mut app = App::new(state, config);
    log::info!("tui started in {}", data_dir.display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        app.toasts.expire(Instant::now());
        // A question that timed out or was dropped leaves Confirm mode
        if app.mode == Mode::Confirm && app.toasts.pending_confirm().is_none() {
            app.mode = Mode::Navigate;
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
