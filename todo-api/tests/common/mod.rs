//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - In-memory SQLite database with migrations applied
//! - Router wired exactly as in production
//! - Sign-up and sign-in helpers
//! - Request helpers that decode JSON responses

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use todo_api::app::{build_router, AppState};
use todo_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use todo_shared::db::{migrations::run_migrations, pool};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub state: AppState,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context backed by a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        let config = test_config();

        let db = pool::create_pool(pool::DatabaseConfig::in_memory()).await?;
        run_migrations(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state.clone());

        Ok(TestContext {
            db,
            state,
            app,
            config,
        })
    }

    /// Sends a request and returns the status with the decoded JSON body
    ///
    /// An empty body decodes to `Value::Null`.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    /// Signs up a user and returns the sign-up response
    pub async fn signup(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/todo/api/v1.0/users/signup",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Signs in and returns the sign-in response
    pub async fn signin(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/todo/api/v1.0/users/signin",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Signs up and signs in, returning a bearer token
    pub async fn login_as(&self, username: &str) -> String {
        let (status, _) = self.signup(username, "password123").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = self.signin(username, "password123").await;
        assert_eq!(status, StatusCode::OK);

        body["token"].as_str().unwrap().to_string()
    }

    /// Creates a task and returns its id, parsed from the self link
    pub async fn create_task(&self, token: &str, body: Value) -> i64 {
        let (status, body) = self
            .send(Method::POST, "/todo/api/v1.0/tasks", Some(token), Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        task_id(&body)
    }
}

/// Extracts the task id from a task view's self link
pub fn task_id(view: &Value) -> i64 {
    view["links"]["self"]
        .as_str()
        .and_then(|link| link.rsplit('/').next())
        .and_then(|id| id.parse().ok())
        .unwrap()
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            ttl_days: 7,
        },
    }
}
