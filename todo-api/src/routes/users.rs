/// User endpoints
///
/// # Endpoints
///
/// - `POST /todo/api/v1.0/users/signup` - Create an account
/// - `POST /todo/api/v1.0/users/signin` - Exchange credentials for a bearer token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ValidatedJson,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use todo_shared::{
    auth::{jwt, password},
    models::{CreateUser, UserView},
    store::UserStore,
};
use validator::Validate;

/// Sign-up request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        required(message = "No username provided"),
        length(min = 1, max = 32, message = "Username must be 1 to 32 characters")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "No password provided"),
        length(min = 1, message = "Password must not be empty")
    )]
    pub password: Option<String>,
}

/// Sign-in request
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(required(message = "No username provided"))]
    pub username: Option<String>,

    #[validate(required(message = "No password provided"))]
    pub password: Option<String>,
}

/// Sign-in response
#[derive(Debug, Serialize, Deserialize)]
pub struct SigninResponse {
    /// Bearer token for the task endpoints
    pub token: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /todo/api/v1.0/users/signup
/// Content-Type: application/json
///
/// { "username": "alice", "password": "s3cret" }
/// ```
///
/// # Response
///
/// ```json
/// { "username": "alice" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing fields or username already taken
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<Json<UserView>> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    // Rejected before hashing; the UNIQUE constraint covers concurrent sign-ups.
    if state.store.find_user_by_username(&username).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "A user with username '{}' already exists",
            username
        )));
    }

    let password_hash = hash_blocking(password).await?;

    let user = state
        .store
        .create_user(CreateUser {
            username,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, "User signed up");

    Ok(Json(UserView::from(&user)))
}

/// Sign in and receive a token
///
/// # Endpoint
///
/// ```text
/// POST /todo/api/v1.0/users/signin
/// Content-Type: application/json
///
/// { "username": "alice", "password": "s3cret" }
/// ```
///
/// # Response
///
/// ```json
/// { "token": "eyJ..." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing fields
/// - `401 Unauthorized`: Wrong password
/// - `404 Not Found`: No such user
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SigninRequest>,
) -> ApiResult<Json<SigninResponse>> {
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let user = state
        .store
        .find_user_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::NotFound("could not find a user with that username".to_string()))?;

    if !verify_blocking(password, user.password_hash.clone()).await? {
        tracing::warn!(user_id = user.id, "Sign-in with wrong password");
        return Err(ApiError::Unauthorized("invalid password".to_string()));
    }

    let token = jwt::issue_token(user.id, state.config.token_ttl(), state.jwt_secret())?;

    tracing::info!(user_id = user.id, "User signed in");

    Ok(Json(SigninResponse { token }))
}

/// Hashes on the blocking pool
async fn hash_blocking(plaintext: String) -> ApiResult<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
        .await
        .map_err(|e| ApiError::InternalError(format!("Password hashing task failed: {}", e)))?
        .map_err(ApiError::from)
}

/// Verifies on the blocking pool
async fn verify_blocking(plaintext: String, hash: String) -> ApiResult<bool> {
    tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &hash))
        .await
        .map_err(|e| ApiError::InternalError(format!("Password verification task failed: {}", e)))?
        .map_err(ApiError::from)
}
