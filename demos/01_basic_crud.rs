//! Example 01: Basic CRUD Operations
//!
//! This example demonstrates adding, editing, toggling, and deleting tasks,
//! with the snapshot mirror rewritten after each mutation.
//!
//! Run with: cargo run --example 01_basic_crud

use eyre::Result;
use taskpad::{FileStore, Query, TaskStore};

fn main() -> Result<()> {
    // Create a temporary directory for this example
    let temp_dir = tempfile::tempdir()?;

    println!("Taskpad Basic CRUD Example");
    println!("==========================\n");
    println!("Store path: {}\n", temp_dir.path().display());

    let file = FileStore::open(temp_dir.path())?;
    let mut store = TaskStore::with_tasks(file.load_or_default());

    // ADD: titles are validated by the store itself
    println!("1. ADD - Adding tasks...");
    let milk = store.add("Buy milk")?;
    let review = store.add("Code review")?;
    store.add("Water the plants")?;
    assert!(store.add("   ").is_err());
    file.save(store.tasks())?;
    println!("   {} tasks in the list (whitespace title rejected)\n", store.len());

    // EDIT: tasks are addressed by id, never by position
    println!("2. EDIT - Renaming a task...");
    store.edit(milk, "Buy oat milk")?;
    file.save(store.tasks())?;
    println!("   Now titled '{}'\n", store.get(milk).unwrap().title);

    // TOGGLE
    println!("3. TOGGLE - Completing the review...");
    let completed = store.toggle_completion(review)?;
    file.save(store.tasks())?;
    println!("   Completed: {}\n", completed);

    // DELETE
    println!("4. DELETE - Removing a task...");
    let removed = store.delete(milk)?;
    file.save(store.tasks())?;
    println!("   Removed '{}'\n", removed.title);

    // The canonical list, as a plain (unsorted, unfiltered) view
    println!("5. Remaining tasks:");
    for task in store.query(&Query::default()) {
        let marker = if task.completed { "x" } else { " " };
        println!("   [{}] {}", marker, task.title);
    }

    // The snapshot mirrors what is in memory
    let reloaded = file.load()?;
    println!("\nSnapshot holds {} tasks.", reloaded.len());

    Ok(())
}
