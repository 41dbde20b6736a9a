/// Task endpoints
///
/// Every route here sits behind the JWT layer, so handlers can rely on an
/// `AuthContext` extension. Anyone authenticated may list and read tasks;
/// only the owner may update or delete one.
///
/// # Endpoints
///
/// - `GET    /todo/api/v1.0/tasks`      - List all tasks
/// - `POST   /todo/api/v1.0/tasks`      - Create a task owned by the caller
/// - `GET    /todo/api/v1.0/tasks/:id`  - Get one task
/// - `PUT    /todo/api/v1.0/tasks/:id`  - Update a task (owner only)
/// - `DELETE /todo/api/v1.0/tasks/:id`  - Delete a task (owner only)
///
/// Reads and updates of a single task answer `201 Created`, matching the
/// status existing clients of this API expect.

use crate::{
    app::{AppState, API_PREFIX},
    error::{ApiError, ApiResult, TASK_NOT_FOUND},
    extract::{TaskId, ValidatedJson},
};
use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use todo_shared::{
    auth::{authorization::require_task_owner, middleware::AuthContext},
    models::{CreateTask, Task, UpdateTask},
    store::TaskStore,
};
use validator::Validate;

/// Hyperlinks embedded in a task view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLinks {
    /// URL of this task
    #[serde(rename = "self")]
    pub self_link: String,

    /// URL of the task collection
    pub collection: String,
}

/// Task as exposed over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    pub links: TaskLinks,
    pub title: String,
    pub description: String,
    pub status: bool,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        let collection = format!("{}/tasks", API_PREFIX);

        Self {
            links: TaskLinks {
                self_link: format!("{}/{}", collection, task.id),
                collection,
            },
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
        }
    }
}

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(
        required(message = "No task title provided"),
        length(max = 100, message = "Title must be at most 100 characters")
    )]
    pub title: Option<String>,

    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: Option<String>,
}

/// Update task request
///
/// Empty strings and `false` leave the stored value unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(max = 100, message = "Title must be at most 100 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: Option<String>,

    pub status: Option<bool>,
}

/// Lists all tasks, regardless of owner
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskView>>> {
    let tasks = state.store.list_tasks().await?;

    Ok(Json(tasks.iter().map(TaskView::from).collect()))
}

/// Creates a task owned by the caller
///
/// # Endpoint
///
/// ```text
/// POST /todo/api/v1.0/tasks
/// Authorization: Bearer eyJ...
///
/// { "title": "Buy milk", "description": "semi-skimmed" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing title or oversized fields
/// - `401 Unauthorized`: Missing or invalid token
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskView>)> {
    let task = state
        .store
        .create_task(CreateTask {
            title: req.title.unwrap_or_default(),
            description: req.description,
            user_id: auth.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TaskView::from(&task))))
}

/// Gets a single task
///
/// # Errors
///
/// - `404 Not Found`: No task with that id, or an id that is not an integer
pub async fn get_task(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> ApiResult<(StatusCode, Json<TaskView>)> {
    let task = state
        .store
        .get_task(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(TASK_NOT_FOUND.to_string()))?;

    Ok((StatusCode::CREATED, Json(TaskView::from(&task))))
}

/// Updates a task owned by the caller
///
/// # Errors
///
/// - `404 Not Found`: No task with that id, or the caller does not own it
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    TaskId(id): TaskId,
    ValidatedJson(req): ValidatedJson<UpdateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskView>)> {
    require_task_owner(state.store.as_ref(), &auth, id).await?;

    let task = state
        .store
        .update_task(
            id,
            UpdateTask {
                title: req.title,
                description: req.description,
                status: req.status,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(TASK_NOT_FOUND.to_string()))?;

    Ok((StatusCode::CREATED, Json(TaskView::from(&task))))
}

/// Deletes a task owned by the caller
///
/// # Errors
///
/// - `404 Not Found`: No task with that id, or the caller does not own it
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    TaskId(id): TaskId,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    require_task_owner(state.store.as_ref(), &auth, id).await?;

    if !state.store.delete_task(id).await? {
        return Err(ApiError::NotFound(TASK_NOT_FOUND.to_string()));
    }

    tracing::info!(task_id = id, user_id = auth.user_id, "Task deleted");

    Ok((StatusCode::NO_CONTENT, Json(json!({ "result": true }))))
}
