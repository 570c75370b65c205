use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use clap::Parser;
use tasklist::cli::commands::Cli;
use tasklist::cli::handlers;
use tasklist::io::config_io;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => run_tui(cli.data_dir.as_deref()),
        Some(_) => {
            setup_logging(None);
            handlers::dispatch(cli)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run_tui(data_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = config_io::resolve_data_dir(data_dir.map(Path::new))?;
    setup_logging(Some(data_dir.join("tasklist.log")));
    tasklist::tui::run(&data_dir)
}

/// Warn level unless RUST_LOG says otherwise. With a file, log lines go
/// there instead of stderr so they never land on the TUI's screen.
fn setup_logging(file: Option<PathBuf>) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env();

    if let Some(path) = file {
        match open_log_file(&path) {
            Ok(f) => {
                builder.target(env_logger::Target::Pipe(Box::new(f)));
            }
            // Said once before the screen is taken over, then logging stays off
            Err(e) => {
                eprintln!("warning: logging disabled, cannot open {}: {}", path.display(), e);
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    let _ = builder.try_init();
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
