/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "migrations": "up_to_date"
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use todo_shared::db::{migrations, pool};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,

    /// Schema status: `up_to_date`, `pending`, or `unknown`
    pub migrations: String,
}

/// Health check handler
///
/// Always answers 200; a failing database or pending migrations downgrade
/// `status` to `degraded`.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let connected = pool::health_check(&state.db).await.is_ok();

    let migrations = match migrations::get_migration_status(&state.db).await {
        Ok(status) if status.is_up_to_date => "up_to_date",
        Ok(status) => {
            tracing::warn!(
                applied = status.applied_migrations,
                "Database schema is behind the embedded migrations"
            );
            "pending"
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not read migration status");
            "unknown"
        }
    };

    let healthy = connected && migrations == "up_to_date";

    Ok(Json(HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        migrations: migrations.to_string(),
    }))
}
