use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use std::io::{self, Write};
use std::path::PathBuf;
use taskpad::{FileStore, FilterOption, Query, SortCriterion, SortOption, Task, TaskId, TaskStore};
use tracing::warn;

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(about = "Taskpad CLI - to-do list with sorted, filtered, and searched views")]
#[command(version)]
struct Cli {
    /// Path to the store directory (default: platform data directory)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add { title: String },

    /// Show tasks, optionally sorted, filtered, and searched
    List {
        /// View order: none, oldest, or newest (unknown values mean none)
        #[arg(long, default_value = "none")]
        sort: String,

        /// Completion filter: all, completed, or active (unknown values mean all)
        #[arg(long, default_value = "all")]
        filter: String,

        /// Case-insensitive title search
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Replace a task's title
    Edit { id: String, title: String },

    /// Delete a task
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Toggle a task between active and completed
    Toggle { id: String },

    /// Permanently re-sort the task list (due-date, completion, or category)
    Sort { criterion: String },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let store_dir = cli.store_path.unwrap_or_else(default_store_dir);
    let file = FileStore::open(&store_dir)?;
    let mut store = TaskStore::with_tasks(file.load_or_default());

    match cli.command {
        Commands::Add { title } => {
            let id = store.add(&title)?;
            persist(&file, &store);
            println!("Added task {}", short_id(id));
        }
        Commands::List { sort, filter, search } => {
            let query = Query {
                sort: SortOption::parse_lenient(&sort),
                filter: FilterOption::parse_lenient(&filter),
                search,
            };
            let view = store.query(&query);
            if view.is_empty() {
                println!("No tasks to show");
            }
            for task in &view {
                println!("{}", render_task(task));
            }
        }
        Commands::Edit { id, title } => {
            let id = resolve_id(&store, &id)?;
            store.edit(id, &title)?;
            persist(&file, &store);
            println!("Updated task {}", short_id(id));
        }
        Commands::Delete { id, yes } => {
            let id = resolve_id(&store, &id)?;
            if yes || confirm(&format!("Delete task {}?", short_id(id)))? {
                let removed = store.delete(id)?;
                persist(&file, &store);
                println!("Deleted '{}'", removed.title);
            } else {
                println!("Kept task {}", short_id(id));
            }
        }
        Commands::Toggle { id } => {
            let id = resolve_id(&store, &id)?;
            let completed = store.toggle_completion(id)?;
            persist(&file, &store);
            let state = if completed { "completed" } else { "active" };
            println!("Marked task {} as {}", short_id(id), state);
        }
        Commands::Sort { criterion } => {
            let criterion: SortCriterion = criterion.parse()?;
            store.sort_by(criterion);
            persist(&file, &store);
            println!("Tasks sorted by {}", criterion);
        }
    }

    Ok(())
}

/// Platform data directory, falling back to the current directory
fn default_store_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskpad")
}

/// Save failures are non-fatal; the in-memory list stays authoritative
fn persist(file: &FileStore, store: &TaskStore) {
    if let Err(e) = file.save(store.tasks()) {
        warn!(error = ?e, "Failed to save tasks; this change was not persisted");
    }
}

/// Accept a full task id or any unique prefix of one
fn resolve_id(store: &TaskStore, input: &str) -> Result<TaskId> {
    let matches: Vec<TaskId> = store
        .tasks()
        .iter()
        .filter(|t| t.id.to_string().starts_with(input))
        .map(|t| t.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(eyre!("No task matches id '{}'", input)),
        _ => Err(eyre!("Id '{}' is ambiguous ({} matches)", input, matches.len())),
    }
}

fn short_id(id: TaskId) -> String {
    id.to_string()[..8].to_string()
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn render_task(task: &Task) -> String {
    let marker = if task.completed {
        "[x]".green()
    } else {
        "[ ]".normal()
    };
    let title = if task.completed {
        task.title.strikethrough().dimmed()
    } else {
        task.title.normal()
    };
    let due = chrono::DateTime::from_timestamp_millis(task.due_date)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| task.due_date.to_string());

    let mut line = format!("{} {} {} {}", short_id(task.id).cyan(), marker, title, due.dimmed());
    if !task.category.is_empty() {
        line.push_str(&format!(" #{}", task.category));
    }
    line
}
