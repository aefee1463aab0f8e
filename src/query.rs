// View options for querying the task list

use crate::task::Task;
use eyre::{Report, eyre};
use std::str::FromStr;

/// Parameters for a non-destructive view of the task list
///
/// Applied in order: sort, then filter, then search.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub sort: SortOption,
    pub filter: FilterOption,
    /// Case-insensitive substring match on the title; empty means no search.
    pub search: String,
}

/// Query-time ordering; never touches canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Keep canonical order.
    #[default]
    None,
    /// Ascending by due date.
    Oldest,
    /// Descending by due date.
    Newest,
}

impl SortOption {
    /// Parse a user-supplied value, falling back to `None` when unmatched.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "oldest" => SortOption::Oldest,
            "newest" => SortOption::Newest,
            _ => SortOption::None,
        }
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOption::None => write!(f, "none"),
            SortOption::Oldest => write!(f, "oldest"),
            SortOption::Newest => write!(f, "newest"),
        }
    }
}

/// Query-time completion filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterOption {
    #[default]
    All,
    Completed,
    Active,
}

impl FilterOption {
    /// Whether a task survives this filter.
    pub fn keeps(self, task: &Task) -> bool {
        match self {
            FilterOption::All => true,
            FilterOption::Completed => task.completed,
            FilterOption::Active => !task.completed,
        }
    }

    /// Parse a user-supplied value, falling back to `All` when unmatched.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "completed" => FilterOption::Completed,
            "active" => FilterOption::Active,
            _ => FilterOption::All,
        }
    }
}

impl std::fmt::Display for FilterOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterOption::All => write!(f, "all"),
            FilterOption::Completed => write!(f, "completed"),
            FilterOption::Active => write!(f, "active"),
        }
    }
}

/// Criterion for the permanent, canonical-order sort
///
/// Distinct from [`SortOption`]: this one reorders the list for good, so
/// parsing is strict rather than falling back silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    /// Ascending by due date.
    DueDate,
    /// Active tasks before completed ones.
    CompletionStatus,
    /// Lexicographic by category.
    Category,
}

impl FromStr for SortCriterion {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "due-date" | "due_date" | "duedate" => Ok(SortCriterion::DueDate),
            "completion" | "completion-status" | "completion_status" | "completionstatus" => {
                Ok(SortCriterion::CompletionStatus)
            }
            "category" => Ok(SortCriterion::Category),
            other => Err(eyre!(
                "Unknown sort criterion: {} (expected due-date, completion, or category)",
                other
            )),
        }
    }
}

impl std::fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortCriterion::DueDate => write!(f, "due-date"),
            SortCriterion::CompletionStatus => write!(f, "completion"),
            SortCriterion::Category => write!(f, "category"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_default() {
        let query = Query::default();
        assert_eq!(query.sort, SortOption::None);
        assert_eq!(query.filter, FilterOption::All);
        assert_eq!(query.search, "");
    }

    #[test]
    fn test_sort_option_parse_lenient() {
        assert_eq!(SortOption::parse_lenient("oldest"), SortOption::Oldest);
        assert_eq!(SortOption::parse_lenient(" Newest "), SortOption::Newest);
        assert_eq!(SortOption::parse_lenient("none"), SortOption::None);

        // Unmatched values fall back to canonical order
        assert_eq!(SortOption::parse_lenient("bogus"), SortOption::None);
        assert_eq!(SortOption::parse_lenient(""), SortOption::None);
    }

    #[test]
    fn test_filter_option_parse_lenient() {
        assert_eq!(FilterOption::parse_lenient("completed"), FilterOption::Completed);
        assert_eq!(FilterOption::parse_lenient("ACTIVE"), FilterOption::Active);
        assert_eq!(FilterOption::parse_lenient("all"), FilterOption::All);

        // Unmatched values fall back to everything
        assert_eq!(FilterOption::parse_lenient("bogus"), FilterOption::All);
    }

    #[test]
    fn test_filter_option_keeps() {
        let mut task = Task::new("A");
        assert!(FilterOption::All.keeps(&task));
        assert!(FilterOption::Active.keeps(&task));
        assert!(!FilterOption::Completed.keeps(&task));

        task.completed = true;
        assert!(FilterOption::All.keeps(&task));
        assert!(!FilterOption::Active.keeps(&task));
        assert!(FilterOption::Completed.keeps(&task));
    }

    #[test]
    fn test_sort_criterion_from_str() {
        assert_eq!("due-date".parse::<SortCriterion>().unwrap(), SortCriterion::DueDate);
        assert_eq!(
            "completion".parse::<SortCriterion>().unwrap(),
            SortCriterion::CompletionStatus
        );
        assert_eq!("Category".parse::<SortCriterion>().unwrap(), SortCriterion::Category);

        // The permanent sort does not fall back silently
        assert!("bogus".parse::<SortCriterion>().is_err());
        assert!("".parse::<SortCriterion>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        assert_eq!(SortOption::parse_lenient(&SortOption::Newest.to_string()), SortOption::Newest);
        assert_eq!(
            FilterOption::parse_lenient(&FilterOption::Active.to_string()),
            FilterOption::Active
        );
        assert_eq!(
            SortCriterion::DueDate.to_string().parse::<SortCriterion>().unwrap(),
            SortCriterion::DueDate
        );
    }
}
