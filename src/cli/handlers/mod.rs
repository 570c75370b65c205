use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::store::Store;
use crate::model::task::Filter;
use crate::ops::task_ops::{self, TaskError};
use crate::state::{TaskState, UpdateOutcome};

const REORDER_ONLY_IN_ALL: &str = "Reordering is only available in \"All Tasks\" view";

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let Some(command) = cli.command else {
        return Err("no command given (try `tl --help`)".into());
    };

    let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref().map(Path::new))?;
    log::debug!("data dir: {}", data_dir.display());
    let mut state = TaskState::load(Store::open_dir(&data_dir));

    match command {
        // Read commands
        Commands::List(args) => cmd_list(&state, args, json),
        Commands::Stats => cmd_stats(&state, json),

        // Write commands
        Commands::Add(args) => cmd_add(&mut state, args, json),
        Commands::Toggle(args) => cmd_toggle(&mut state, args, json),
        Commands::Edit(args) => cmd_edit(&mut state, args, json),
        Commands::Delete(args) => cmd_delete(&mut state, args, json),
        Commands::Mv(args) => cmd_mv(&mut state, args),
        Commands::Clear => cmd_clear(&mut state, json),
        Commands::Filter(args) => cmd_filter(&mut state, args, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a typed reference to a full id and its current index.
fn resolve_id(state: &TaskState, reference: &str) -> Result<(String, usize), TaskError> {
    let id = state.resolve(reference)?.id.clone();
    let idx = state
        .position(&id)
        .ok_or_else(|| TaskError::NotFound(id.clone()))?;
    Ok((id, idx))
}

fn print_task_json(state: &TaskState, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let idx = state
        .position(id)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
    let task = &state.tasks()[idx];
    println!("{}", serde_json::to_string_pretty(&task_to_json(task, idx))?);
    Ok(())
}

/// 1-based position from the command line to a 0-based index
fn to_index(position: usize) -> Result<usize, TaskError> {
    position
        .checked_sub(1)
        .ok_or_else(|| TaskError::InvalidPosition("positions start at 1".to_string()))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(state: &TaskState, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match args.filter.as_deref() {
        Some(s) => s.parse::<Filter>()?,
        None => state.filter(),
    };
    let stats = state.stats();

    if json {
        let tasks = state
            .tasks()
            .iter()
            .enumerate()
            .filter(|(_, t)| filter.matches(t))
            .map(|(i, t)| task_to_json(t, i))
            .collect();
        let out = TaskListJson {
            filter,
            tasks,
            stats,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_listing(state.tasks(), filter) {
            println!("{}", line);
        }
        println!();
        println!("{}", format_footer(filter, &stats));
    }
    Ok(())
}

fn cmd_stats(state: &TaskState, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stats = state.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", stats.summary());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(state: &mut TaskState, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let joined = args.text.join(" ");
    let text = task_ops::validate_task_text(&joined)?;
    let id = state.add_task(text)?.id.clone();

    if json {
        print_task_json(state, &id)?;
    } else {
        println!("Task added successfully! ({})", id);
    }
    Ok(())
}

fn cmd_toggle(state: &mut TaskState, args: IdArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (id, idx) = resolve_id(state, &args.id)?;
    let completed = state
        .toggle_task(&id)
        .ok_or_else(|| TaskError::NotFound(id.clone()))?;

    if json {
        print_task_json(state, &id)?;
    } else {
        let task = &state.tasks()[idx];
        let verb = if completed { "Completed" } else { "Reopened" };
        println!("{}: {}", verb, task.text);
    }
    Ok(())
}

fn cmd_edit(state: &mut TaskState, args: EditArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (id, _) = resolve_id(state, &args.id)?;
    let joined = args.text.join(" ");
    let text = task_ops::validate_task_text(&joined)?;
    let outcome = state.update_task(&id, text)?;

    if json {
        print_task_json(state, &id)?;
    } else {
        match outcome {
            UpdateOutcome::Updated => println!("Task updated successfully!"),
            UpdateOutcome::Unchanged => println!("No changes"),
        }
    }
    Ok(())
}

fn cmd_delete(state: &mut TaskState, args: IdArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (id, idx) = resolve_id(state, &args.id)?;
    let removed = state
        .delete_task(&id)
        .ok_or_else(|| TaskError::NotFound(id.clone()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&removed, idx))?);
    } else {
        println!("Deleted \"{}\"", removed.text);
    }
    Ok(())
}

fn cmd_mv(state: &mut TaskState, args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    if state.filter() != Filter::All {
        return Err(REORDER_ONLY_IN_ALL.into());
    }
    let source = to_index(args.from)?;
    let dest = to_index(args.to)?;
    state.reorder_task_list(source, dest)?;

    let task = &state.tasks()[dest];
    println!("\"{}\" moved to position {}", task.text, dest + 1);
    Ok(())
}

fn cmd_clear(state: &mut TaskState, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let positions: Vec<usize> = state
        .tasks()
        .iter()
        .enumerate()
        .filter(|(_, t)| t.completed)
        .map(|(i, _)| i)
        .collect();
    let removed = state.clear_completed();

    if json {
        let out = ClearedJson {
            cleared: removed
                .iter()
                .zip(positions)
                .map(|(t, i)| task_to_json(t, i))
                .collect(),
            stats: state.stats(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if removed.is_empty() {
        println!("No completed tasks to clear!");
    } else {
        let n = removed.len();
        println!("Cleared {} completed task{}", n, if n == 1 { "" } else { "s" });
    }
    Ok(())
}

fn cmd_filter(state: &mut TaskState, args: FilterArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(value) = args.value.as_deref() {
        let filter: Filter = value.parse()?;
        state.set_filter(filter);
        if !json {
            println!("{}", filter.showing_message());
            return Ok(());
        }
    }

    if json {
        println!("{}", serde_json::to_string(&state.filter())?);
    } else {
        println!("{}", state.filter());
    }
    Ok(())
}
