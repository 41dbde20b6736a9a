/// Task model
///
/// A task is a to-do item owned by the user who created it. Ownership is
/// fixed at creation: no update path touches `user_id`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id          INTEGER PRIMARY KEY AUTOINCREMENT,
///     title       VARCHAR(100) NOT NULL,
///     description VARCHAR(200) NOT NULL DEFAULT '',
///     status      BOOLEAN      NOT NULL DEFAULT FALSE,
///     user_id     INTEGER REFERENCES users(id)
/// );
/// ```
///
/// # Updates
///
/// Updates merge field by field and only take *truthy* values: a non-empty
/// string or `true`. An empty string or `false` is treated exactly like an
/// omitted field, so a completed task cannot be marked incomplete again.
///
/// ```
/// use todo_shared::models::task::{Task, UpdateTask};
///
/// let mut task = Task {
///     id: 1,
///     title: "Buy milk".to_string(),
///     description: String::new(),
///     status: false,
///     user_id: Some(1),
/// };
///
/// task.apply(UpdateTask { status: Some(true), ..Default::default() });
/// assert_eq!(task.title, "Buy milk");
/// assert!(task.status);
/// ```

use serde::{Deserialize, Serialize};

/// Maximum title length in characters
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Task record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Generated task ID
    pub id: i64,

    /// Task title (required)
    pub title: String,

    /// Free-form description, empty when not supplied
    pub description: String,

    /// Completion flag
    pub status: bool,

    /// Owning user (nullable for rows created without an owner)
    pub user_id: Option<i64>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,

    /// Defaults to an empty string when `None`
    pub description: Option<String>,

    /// Requesting user
    pub user_id: i64,
}

/// Input for updating a task
///
/// Each field replaces the stored value only when present and truthy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<bool>,
}

impl Task {
    /// Returns true if `user_id` owns this task
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }

    /// Merges an update into this task using truthy-only semantics
    pub fn apply(&mut self, changes: UpdateTask) {
        if let Some(title) = changes.title.filter(|t| !t.is_empty()) {
            self.title = title;
        }
        if let Some(description) = changes.description.filter(|d| !d.is_empty()) {
            self.description = description;
        }
        if changes.status == Some(true) {
            self.status = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: 1,
            title: "Buy milk".to_string(),
            description: "two litres".to_string(),
            status: false,
            user_id: Some(10),
        }
    }

    #[test]
    fn test_apply_status_only() {
        let mut task = sample_task();
        task.apply(UpdateTask {
            status: Some(true),
            ..Default::default()
        });

        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "two litres");
        assert!(task.status);
    }

    #[test]
    fn test_apply_replaces_non_empty_strings() {
        let mut task = sample_task();
        task.apply(UpdateTask {
            title: Some("Buy bread".to_string()),
            description: Some("wholemeal".to_string()),
            status: None,
        });

        assert_eq!(task.title, "Buy bread");
        assert_eq!(task.description, "wholemeal");
        assert!(!task.status);
    }

    #[test]
    fn test_apply_ignores_falsy_values() {
        let mut task = sample_task();
        task.status = true;

        task.apply(UpdateTask {
            title: Some(String::new()),
            description: Some(String::new()),
            status: Some(false),
        });

        assert_eq!(task, Task { status: true, ..sample_task() });
    }

    #[test]
    fn test_apply_never_changes_owner() {
        let mut task = sample_task();
        task.apply(UpdateTask {
            title: Some("Other".to_string()),
            ..Default::default()
        });

        assert_eq!(task.user_id, Some(10));
        assert_eq!(task.id, 1);
    }

    #[test]
    fn test_is_owned_by() {
        let task = sample_task();
        assert!(task.is_owned_by(10));
        assert!(!task.is_owned_by(11));

        let orphan = Task { user_id: None, ..sample_task() };
        assert!(!orphan.is_owned_by(10));
    }
}
