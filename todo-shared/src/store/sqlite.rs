//! SQLite-backed store

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

use super::{StoreError, TaskStore, UserStore};
use crate::models::{CreateTask, CreateUser, Task, UpdateTask, User};

/// Store backed by a SQLite connection pool
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for health checks and shutdown
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError> {
        let username = data.username.clone();

        // The UNIQUE constraint is the authoritative duplicate check
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(username)
            }
            other => StoreError::Database(other),
        })?;

        debug!(user_id = user.id, "Created user");
        Ok(user)
    }
}

#[async_trait]
impl TaskStore for SqliteStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, user_id FROM tasks ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn get_task(&self, id: i64) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, user_id FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn create_task(&self, data: CreateTask) -> Result<Task, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, user_id)
            VALUES (?, ?, FALSE, ?)
            RETURNING id, title, description, status, user_id
            "#,
        )
        .bind(data.title)
        .bind(data.description.unwrap_or_default())
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await?;

        debug!(task_id = task.id, user_id = data.user_id, "Created task");
        Ok(task)
    }

    async fn update_task(&self, id: i64, changes: UpdateTask) -> Result<Option<Task>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, user_id FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut task) = existing else {
            return Ok(None);
        };

        task.apply(changes);

        sqlx::query("UPDATE tasks SET title = ?, description = ?, status = ? WHERE id = ?")
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.status)
            .bind(task.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(task_id = task.id, "Updated task");
        Ok(Some(task))
    }

    async fn delete_task(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        debug!(task_id = id, deleted, "Deleted task");
        Ok(deleted)
    }
}
