/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Bearer token issuance and validation
/// - [`middleware`]: Resolving a request's bearer token to a user
/// - [`authorization`]: Task ownership checks
///
/// # Example
///
/// ```no_run
/// use todo_shared::auth::password::{hash_password, verify_password};
/// use todo_shared::auth::jwt::{create_token, verify_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let token = create_token(&Claims::new(1), "secret-key")?;
/// assert_eq!(verify_token(&token, "secret-key")?, 1);
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod jwt;
pub mod middleware;
pub mod authorization;
