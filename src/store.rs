// In-memory task list with id-addressed mutations and a pure query pipeline

use crate::query::{Query, SortCriterion, SortOption};
use crate::task::{Task, TaskId};
use eyre::{Result, eyre};
use tracing::debug;

/// Owner of the canonical task list
///
/// Insertion order is canonical order. Only [`TaskStore::sort_by`] reorders
/// the list; [`TaskStore::query`] works on a copy and never mutates. Every
/// mutation validates before touching the list, so a failed call leaves the
/// list exactly as it was.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Build a store from previously saved tasks, preserving their order
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// The canonical list, in canonical order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new active task due now and return its id
    ///
    /// The title is trimmed; empty or whitespace-only titles are rejected.
    pub fn add(&mut self, title: &str) -> Result<TaskId> {
        let title = Self::validate_title(title)?;

        let task = Task::new(title);
        let id = task.id;
        debug!(%id, title, "add: appending task");
        self.tasks.push(task);

        Ok(id)
    }

    /// Replace the title of the identified task
    ///
    /// Same title rules as [`TaskStore::add`].
    pub fn edit(&mut self, id: TaskId, new_title: &str) -> Result<()> {
        let new_title = Self::validate_title(new_title)?;
        let index = self.position(id)?;

        self.tasks[index].title = new_title.to_string();
        Ok(())
    }

    /// Remove exactly one task, returning it
    ///
    /// Tasks after the removed one shift down; their relative order is
    /// unchanged.
    pub fn delete(&mut self, id: TaskId) -> Result<Task> {
        let index = self.position(id)?;
        debug!(%id, "delete: removing task");
        Ok(self.tasks.remove(index))
    }

    /// Flip the completion flag of the identified task, returning the new value
    pub fn toggle_completion(&mut self, id: TaskId) -> Result<bool> {
        let index = self.position(id)?;

        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Permanently reorder the canonical list
    ///
    /// This is the destructive counterpart of the query-time sort. Sorts are
    /// stable, so ties keep their previous relative order.
    pub fn sort_by(&mut self, criterion: SortCriterion) {
        debug!(%criterion, "sort_by: reordering canonical list");
        match criterion {
            SortCriterion::DueDate => self.tasks.sort_by_key(|t| t.due_date),
            SortCriterion::CompletionStatus => self.tasks.sort_by_key(|t| t.completed),
            SortCriterion::Category => self.tasks.sort_by(|a, b| a.category.cmp(&b.category)),
        }
    }

    // ========================================================================
    // Query
    // ========================================================================

    /// Build a display view: sort, then filter, then search
    ///
    /// Works on a copy of the canonical list; the store is not changed. The
    /// search is a case-insensitive substring match on the title and only
    /// applies when the search text is non-empty.
    pub fn query(&self, query: &Query) -> Vec<Task> {
        let mut view = self.tasks.clone();

        match query.sort {
            SortOption::None => {}
            SortOption::Oldest => view.sort_by_key(|t| t.due_date),
            SortOption::Newest => view.sort_by_key(|t| std::cmp::Reverse(t.due_date)),
        }

        view.retain(|t| query.filter.keeps(t));

        if !query.search.is_empty() {
            let needle = query.search.to_lowercase();
            view.retain(|t| t.title.to_lowercase().contains(&needle));
        }

        view
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn position(&self, id: TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| eyre!("Task not found: {}", id))
    }

    fn validate_title(title: &str) -> Result<&str> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(eyre!("Task title cannot be empty or whitespace-only"));
        }
        Ok(trimmed)
    }
}
