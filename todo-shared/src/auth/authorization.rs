/// Resource ownership checks
///
/// Any authenticated user may list and read tasks; only a task's owner may
/// update or delete it. [`require_task_owner`] loads the task and enforces
/// that rule before the mutation runs.
///
/// # Example
///
/// ```no_run
/// use todo_shared::auth::authorization::require_task_owner;
/// use todo_shared::auth::middleware::AuthContext;
/// use todo_shared::store::TaskStore;
///
/// async fn delete<S: TaskStore>(store: &S, auth: &AuthContext, id: i64) -> Result<(), String> {
///     require_task_owner(store, auth, id).await.map_err(|e| e.to_string())?;
///     store.delete_task(id).await.map_err(|e| e.to_string())?;
///     Ok(())
/// }
/// ```

use super::middleware::AuthContext;
use crate::models::Task;
use crate::store::{StoreError, TaskStore};

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// The task does not exist
    #[error("Task {0} not found")]
    NotFound(i64),

    /// The task exists but belongs to someone else
    #[error("User {user_id} does not own task {task_id}")]
    NotOwner { task_id: i64, user_id: i64 },

    /// Store lookup failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Checks that `auth` may modify `task`
pub fn check_task_owner(task: &Task, auth: &AuthContext) -> Result<(), AuthzError> {
    if task.is_owned_by(auth.user_id) {
        Ok(())
    } else {
        Err(AuthzError::NotOwner {
            task_id: task.id,
            user_id: auth.user_id,
        })
    }
}

/// Loads a task and checks that the requester owns it
///
/// # Errors
///
/// - `AuthzError::NotFound` if the task does not exist
/// - `AuthzError::NotOwner` if it belongs to another user (or to nobody)
pub async fn require_task_owner<S>(
    tasks: &S,
    auth: &AuthContext,
    task_id: i64,
) -> Result<Task, AuthzError>
where
    S: TaskStore + ?Sized,
{
    let task = tasks
        .get_task(task_id)
        .await?
        .ok_or(AuthzError::NotFound(task_id))?;

    check_task_owner(&task, auth)?;

    Ok(task)
}
