use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tl", about = concat!("tasklist v", env!("CARGO_PKG_VERSION"), " - stay organized and productive"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory (default: $TASKLIST_DIR or the platform data dir)
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task to the end of the list
    Add(AddArgs),
    /// List tasks (uses the saved filter unless --filter is given)
    List(ListArgs),
    /// Mark a task completed, or pending again
    Toggle(IdArgs),
    /// Change a task's text
    Edit(EditArgs),
    /// Delete a task
    Delete(IdArgs),
    /// Move a task to another position (only while the filter is "all")
    Mv(MvArgs),
    /// Remove all completed tasks
    Clear,
    /// Show or set the saved filter
    Filter(FilterArgs),
    /// Show task counts
    Stats,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (joined with spaces if given as several words)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Show only this subset: all, pending, completed
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task id, or a unique id prefix
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id, or a unique id prefix
    pub id: String,
    /// New text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Current position (1-based, as shown by `tl list` with filter "all")
    pub from: usize,
    /// New position (1-based)
    pub to: usize,
}

#[derive(Args)]
pub struct FilterArgs {
    /// New filter: all, pending, completed (omit to show the current one)
    pub value: Option<String>,
}
