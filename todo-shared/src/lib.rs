//! # Todo Shared Library
//!
//! Records, storage, and authentication primitives used by the Todo API
//! server.
//!
//! ## Module Organization
//!
//! - `models`: Plain user and task records
//! - `store`: Storage traits and the SQLite implementation
//! - `db`: Connection pool and migrations
//! - `auth`: Password hashing, tokens, request authentication, ownership checks

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
