/// Data records
///
/// Plain structs mirroring the persisted rows, plus the create/update inputs
/// accepted by the `store` traits.
///
/// # Models
///
/// - [`user::User`]: Account with unique username and password hash
/// - [`task::Task`]: To-do item owned by a user

pub mod task;
pub mod user;

pub use task::{CreateTask, Task, UpdateTask};
pub use user::{CreateUser, User, UserView};
