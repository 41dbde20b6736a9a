/// Integration tests for the SQLite store
///
/// Each test runs against its own migrated in-memory database.

use todo_shared::auth::authorization::{require_task_owner, AuthzError};
use todo_shared::auth::middleware::AuthContext;
use todo_shared::db::migrations::run_migrations;
use todo_shared::db::pool::{create_pool, DatabaseConfig};
use todo_shared::models::{CreateTask, CreateUser, UpdateTask, User};
use todo_shared::store::{sqlite::SqliteStore, StoreError, TaskStore, UserStore};

async fn store() -> SqliteStore {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create pool");
    run_migrations(&pool).await.expect("Failed to run migrations");
    SqliteStore::new(pool)
}

async fn user(store: &SqliteStore, username: &str) -> User {
    store
        .create_user(CreateUser {
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
        })
        .await
        .expect("Failed to create user")
}

#[tokio::test]
async fn test_create_and_find_user() {
    let store = store().await;
    let created = user(&store, "alice").await;

    let by_name = store.find_user_by_username("alice").await.unwrap();
    assert_eq!(by_name, Some(created.clone()));

    let by_id = store.find_user_by_id(created.id).await.unwrap();
    assert_eq!(by_id, Some(created));

    assert!(store.find_user_by_username("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let store = store().await;
    user(&store, "alice").await;

    let result = store
        .create_user(CreateUser {
            username: "alice".to_string(),
            password_hash: "different".to_string(),
        })
        .await;

    assert!(matches!(result, Err(StoreError::Conflict(name)) if name == "alice"));
}

#[tokio::test]
async fn test_unique_constraint_maps_to_conflict() {
    let store = store().await;

    // Row written behind the store's back, as a concurrent sign-up would
    sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
        .bind("carol")
        .bind("raw-hash")
        .execute(store.pool())
        .await
        .unwrap();

    let result = store
        .create_user(CreateUser {
            username: "carol".to_string(),
            password_hash: "other-hash".to_string(),
        })
        .await;

    assert!(matches!(result, Err(StoreError::Conflict(name)) if name == "carol"));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind("carol")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_usernames_are_case_sensitive() {
    let store = store().await;
    user(&store, "alice").await;

    let upper = user(&store, "Alice").await;
    assert_eq!(upper.username, "Alice");
}

#[tokio::test]
async fn test_create_task_defaults() {
    let store = store().await;
    let owner = user(&store, "alice").await;

    let task = store
        .create_task(CreateTask {
            title: "X".to_string(),
            description: None,
            user_id: owner.id,
        })
        .await
        .unwrap();

    assert_eq!(task.title, "X");
    assert_eq!(task.description, "");
    assert!(!task.status);
    assert_eq!(task.user_id, Some(owner.id));

    let fetched = store.get_task(task.id).await.unwrap();
    assert_eq!(fetched, Some(task));
}

#[tokio::test]
async fn test_list_returns_every_owner() {
    let store = store().await;
    let alice = user(&store, "alice").await;
    let bob = user(&store, "bob").await;

    for (title, owner) in [("first", &alice), ("second", &bob)] {
        store
            .create_task(CreateTask {
                title: title.to_string(),
                description: Some("d".to_string()),
                user_id: owner.id,
            })
            .await
            .unwrap();
    }

    let tasks = store.list_tasks().await.unwrap();
    let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second"]);
}

#[tokio::test]
async fn test_update_merges_truthy_fields() {
    let store = store().await;
    let owner = user(&store, "alice").await;
    let task = store
        .create_task(CreateTask {
            title: "Buy milk".to_string(),
            description: Some("semi-skimmed".to_string()),
            user_id: owner.id,
        })
        .await
        .unwrap();

    let updated = store
        .update_task(
            task.id,
            UpdateTask {
                status: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Buy milk");
    assert_eq!(updated.description, "semi-skimmed");
    assert!(updated.status);

    // Falsy values are ignored, including an attempt to reopen the task
    let unchanged = store
        .update_task(
            task.id,
            UpdateTask {
                title: Some(String::new()),
                description: Some(String::new()),
                status: Some(false),
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(unchanged, updated);
    assert_eq!(store.get_task(task.id).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn test_update_missing_task() {
    let store = store().await;

    let result = store
        .update_task(404, UpdateTask::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_twice() {
    let store = store().await;
    let owner = user(&store, "alice").await;
    let task = store
        .create_task(CreateTask {
            title: "Temp".to_string(),
            description: None,
            user_id: owner.id,
        })
        .await
        .unwrap();

    assert!(store.delete_task(task.id).await.unwrap());
    assert!(!store.delete_task(task.id).await.unwrap());
    assert!(store.get_task(task.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_require_task_owner() {
    let store = store().await;
    let alice = user(&store, "alice").await;
    let bob = user(&store, "bob").await;
    let task = store
        .create_task(CreateTask {
            title: "Alice's".to_string(),
            description: None,
            user_id: alice.id,
        })
        .await
        .unwrap();

    let as_alice = AuthContext::from(&alice);
    let as_bob = AuthContext::from(&bob);

    let owned = require_task_owner(&store, &as_alice, task.id).await.unwrap();
    assert_eq!(owned.id, task.id);

    assert!(matches!(
        require_task_owner(&store, &as_bob, task.id).await,
        Err(AuthzError::NotOwner { .. })
    ));

    assert!(matches!(
        require_task_owner(&store, &as_alice, task.id + 100).await,
        Err(AuthzError::NotFound(_))
    ));
}
