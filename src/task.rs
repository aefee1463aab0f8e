// Task data model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier assigned to a task at creation.
///
/// UUID v7, so ids are time-ordered. Identity survives edits, toggles, and
/// canonical re-sorts; it is never derived from list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Creation timestamp in milliseconds since epoch; not user-editable.
    pub due_date: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a task due now, active, with an empty category.
    ///
    /// Title validation belongs to the store; this constructor takes the
    /// title as given.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            due_date: now_ms(),
            category: String::new(),
            completed: false,
        }
    }
}

/// Helper function to get current timestamp in milliseconds
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before Unix epoch")
        .as_millis() as i64
}
