/// Request authentication
///
/// Resolves the bearer token on a request to a stored user. The API server's
/// JWT layer calls [`authenticate`] and inserts the resulting [`AuthContext`]
/// into request extensions, where handlers pick it up with Axum's
/// `Extension` extractor.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use todo_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}!", auth.username)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::jwt::{verify_token, JwtError};
use crate::models::User;
use crate::store::{StoreError, UserStore};

/// Identity of the authenticated requester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: i64,

    /// Authenticated username
    pub username: String,
}

impl From<&User> for AuthContext {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Error type for request authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Authorization header is not `Bearer <token>`
    #[error("{0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("{0}")]
    InvalidToken(String),

    /// Token is valid but its user no longer exists
    #[error("Unknown user")]
    UnknownUser,

    /// Store lookup failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Extracts the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))
}

/// Authenticates a request from its headers
///
/// 1. Extracts the bearer token
/// 2. Verifies signature, issuer, and expiry
/// 3. Resolves the subject claim to a stored user
///
/// # Errors
///
/// Every failure except a store error means the caller is unauthenticated.
pub async fn authenticate<U>(
    users: &U,
    secret: &str,
    headers: &HeaderMap,
) -> Result<AuthContext, AuthError>
where
    U: UserStore + ?Sized,
{
    let token = bearer_token(headers)?;

    let user_id = verify_token(token, secret).map_err(|e| {
        warn!(error = %e, "Rejected bearer token");
        match e {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
            _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
        }
    })?;

    let user = users.find_user_by_id(user_id).await?.ok_or_else(|| {
        warn!(user_id, "Token subject does not match any user");
        AuthError::UnknownUser
    })?;

    Ok(AuthContext::from(&user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_wrong_scheme() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_empty_bearer() {
        let headers = headers_with("Bearer ");
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_auth_context_from_user() {
        let user = User {
            id: 3,
            username: "carol".to_string(),
            password_hash: "hash".to_string(),
        };

        let context = AuthContext::from(&user);
        assert_eq!(context.user_id, 3);
        assert_eq!(context.username, "carol");
    }
}
