/// Request extraction with validation
///
/// `ValidatedJson<T>` parses the JSON body and runs `T`'s `validator` rules
/// before the handler sees it, so handlers only ever receive well-formed
/// input. Both parse and validation failures become `400 Bad Request`.
///
/// `TaskId` reads the `:id` path segment. A segment that is not an integer
/// cannot name a task, so it answers `404 Not Found` like a missing one.
///
/// # Example
///
/// ```
/// use serde::Deserialize;
/// use todo_api::extract::ValidatedJson;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct Rename {
///     #[validate(required(message = "name is required"))]
///     name: Option<String>,
/// }
///
/// async fn rename(ValidatedJson(body): ValidatedJson<Rename>) -> String {
///     body.name.unwrap_or_default()
/// }
/// ```

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{ApiError, TASK_NOT_FOUND};

/// JSON body that has passed validation
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(Self(value))
    }
}

/// Task id taken from the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Unparseable task id");
                ApiError::NotFound(TASK_NOT_FOUND.to_string())
            })?;

        Ok(Self(id))
    }
}
