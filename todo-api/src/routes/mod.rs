/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: Sign-up and sign-in
/// - `tasks`: Task CRUD (authenticated)

pub mod health;
pub mod tasks;
pub mod users;
