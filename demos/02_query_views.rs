//! Example 02: Query Views and Permanent Sorting
//!
//! This example demonstrates the non-destructive query pipeline (sort,
//! filter, search) and how it differs from the permanent canonical sort.
//!
//! Run with: cargo run --example 02_query_views

use eyre::Result;
use taskpad::{FilterOption, Query, SortCriterion, SortOption, Task, TaskStore};

fn seeded_task(title: &str, days_ago: i64, completed: bool, category: &str) -> Task {
    let mut task = Task::new(title);
    task.due_date -= days_ago * 86_400_000;
    task.completed = completed;
    task.category = category.to_string();
    task
}

fn print_view(label: &str, view: &[Task]) {
    println!("{}", label);
    for task in view {
        let marker = if task.completed { "x" } else { " " };
        println!("   [{}] {}", marker, task.title);
    }
    println!();
}

fn main() -> Result<()> {
    println!("Taskpad Query Views Example");
    println!("===========================\n");

    let store = TaskStore::with_tasks(vec![
        seeded_task("File taxes", 3, false, "home"),
        seeded_task("Code review", 0, true, "work"),
        seeded_task("Buy milk", 1, false, "errands"),
        seeded_task("Write documentation", 2, true, "work"),
    ]);

    // Query-time sorting copies the list; canonical order is untouched
    let oldest = store.query(&Query {
        sort: SortOption::Oldest,
        ..Default::default()
    });
    print_view("Oldest first:", &oldest);

    let newest = store.query(&Query {
        sort: SortOption::Newest,
        ..Default::default()
    });
    print_view("Newest first:", &newest);

    // Filtering by completion
    let active = store.query(&Query {
        filter: FilterOption::Active,
        ..Default::default()
    });
    print_view("Still to do:", &active);

    // Case-insensitive substring search
    let found = store.query(&Query {
        search: "OD".to_string(),
        ..Default::default()
    });
    print_view("Search for 'OD':", &found);

    // Unknown option strings fall back safely on the view path
    let fallback = Query {
        sort: SortOption::parse_lenient("fancy"),
        filter: FilterOption::parse_lenient("???"),
        search: String::new(),
    };
    println!(
        "Lenient parse of unknown values: sort={}, filter={}\n",
        fallback.sort, fallback.filter
    );

    // The permanent sort is a separate, explicit mutation
    let mut store = store;
    print_view("Canonical order before sort_by:", store.tasks());

    store.sort_by(SortCriterion::Category);
    print_view("Canonical order after sort_by(category):", store.tasks());

    // A typo on the permanent sort is an error, not a silent no-op
    assert!("fancy".parse::<SortCriterion>().is_err());
    println!("Parsing 'fancy' as a permanent sort criterion fails, as it should.");

    Ok(())
}
