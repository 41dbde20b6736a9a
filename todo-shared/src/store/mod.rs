//! Storage interface
//!
//! Persistence goes through two traits, [`UserStore`] (the credential store)
//! and [`TaskStore`], so request handlers and the authorization guard never
//! depend on a particular storage engine. [`sqlite::SqliteStore`] is the
//! production implementation.
//!
//! # Example
//!
//! ```no_run
//! use todo_shared::db::pool::{create_pool, DatabaseConfig};
//! use todo_shared::models::CreateTask;
//! use todo_shared::store::{sqlite::SqliteStore, TaskStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::default()).await?;
//! let store = SqliteStore::new(pool);
//!
//! let task = store
//!     .create_task(CreateTask {
//!         title: "Buy milk".to_string(),
//!         description: None,
//!         user_id: 1,
//!     })
//!     .await?;
//! assert_eq!(task.description, "");
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::models::{CreateTask, CreateUser, Task, UpdateTask, User};

pub mod sqlite;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A user with this username already exists
    #[error("Username already exists: {0}")]
    Conflict(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Finds a user by ID
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Finds a user by exact username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Creates a user
    ///
    /// Fails with [`StoreError::Conflict`] if the username is taken.
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError>;
}

/// Task store
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Lists every task regardless of owner, ordered by ID
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError>;

    /// Gets a task by ID
    async fn get_task(&self, id: i64) -> Result<Option<Task>, StoreError>;

    /// Creates a task with `status = false`
    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError>;

    /// Merges `changes` into a task (see [`Task::apply`])
    ///
    /// Returns `None` if the task does not exist.
    async fn update_task(&self, id: i64, changes: UpdateTask) -> Result<Option<Task>, StoreError>;

    /// Deletes a task, returning false if it did not exist
    async fn delete_task(&self, id: i64) -> Result<bool, StoreError>;
}

/// Combined store held by the API server
pub trait Store: UserStore + TaskStore {}

impl<T: UserStore + TaskStore> Store for T {}
