/// User model
///
/// Users are created on sign-up and are never updated or deleted. Each user
/// owns zero or more tasks.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id            INTEGER PRIMARY KEY AUTOINCREMENT,
///     username      VARCHAR(32)  NOT NULL UNIQUE,
///     password_hash VARCHAR(128) NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};

/// Maximum username length in characters
pub const MAX_USERNAME_LEN: usize = 32;

/// User account record
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Generated user ID
    pub id: i64,

    /// Unique username, compared byte-exact
    pub username: String,

    /// Argon2id password hash (PHC string)
    pub password_hash: String,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Requested username
    pub username: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,
}

/// Public view of a user returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub username: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
        }
    }
}
