/// JWT token issuance and validation
///
/// Tokens are HS256-signed and carry the user ID as the `sub` claim. There is
/// a single token type: sign-in issues it, every task endpoint requires it.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 7 days by default
/// - **Validation**: Signature, expiration, not-before, and issuer checks
/// - **Revocation**: None; rotating the secret invalidates every token
///
/// # Example
///
/// ```
/// use todo_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new(42);
/// let token = create_token(&claims, "your-secret-key")?;
///
/// let validated = validate_token(&token, "your-secret-key")?;
/// assert_eq!(validated.user_id()?, 42);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer written into and required on every token
pub const ISSUER: &str = "todo-api";

/// Default token lifetime in days
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid token format
    #[error("Invalid token format: {0}")]
    InvalidFormat(String),

    /// Invalid issuer
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// JWT claims
///
/// - `sub`: User ID, as a decimal string
/// - `iss`: Always [`ISSUER`]
/// - `iat` / `nbf`: Issue time (Unix timestamp)
/// - `exp`: Expiration time (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub nbf: i64,
}

impl Claims {
    /// Creates claims for `user_id` expiring after the default lifetime
    pub fn new(user_id: i64) -> Self {
        Self::with_expiration(user_id, Duration::days(DEFAULT_TOKEN_TTL_DAYS))
    }

    /// Creates claims with a custom lifetime
    ///
    /// A negative duration yields an already-expired token.
    pub fn with_expiration(user_id: i64, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Parses the user ID out of the subject claim
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse()
            .map_err(|_| JwtError::InvalidFormat(format!("Subject is not a user id: {}", self.sub)))
    }
}

/// Signs claims into a token string
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Issues a token for `user_id` valid for `ttl`
pub fn issue_token(user_id: i64, ttl: Duration, secret: &str) -> Result<String, JwtError> {
    create_token(&Claims::with_expiration(user_id, ttl), secret)
}

/// Validates a token and extracts its claims
///
/// # Errors
///
/// Returns an error if the signature is invalid, the token has expired or is
/// not yet valid, the issuer doesn't match, or the token is malformed.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    // Expiry is exact; no grace period after `exp`
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer {
            expected: ISSUER.to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidToken => {
            JwtError::InvalidFormat(format!("Malformed token: {}", e))
        }
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

/// Validates a token and returns the user ID it was issued for
pub fn verify_token(token: &str, secret: &str) -> Result<i64, JwtError> {
    validate_token(token, secret)?.user_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(5);

        assert_eq!(claims.sub, "5");
        assert_eq!(claims.user_id().unwrap(), 5);
        assert_eq!(claims.iss, ISSUER);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_default_expiration_is_seven_days() {
        let claims = Claims::new(1);
        assert_eq!(claims.exp - claims.iat, Duration::days(7).num_seconds());
    }

    #[test]
    fn test_claims_with_custom_expiration() {
        let claims = Claims::with_expiration(1, Duration::hours(1));

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_create_and_validate_token() {
        let token = create_token(&Claims::new(99), SECRET).expect("Should create token");

        let validated = validate_token(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.user_id().unwrap(), 99);
        assert_eq!(validated.iss, ISSUER);
    }

    #[test]
    fn test_verify_token_returns_user_id() {
        let token = issue_token(12, Duration::days(7), SECRET).unwrap();
        assert_eq!(verify_token(&token, SECRET).unwrap(), 12);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let token = create_token(&Claims::new(1), "secret1").expect("Should create token");

        assert!(validate_token(&token, "wrong-secret").is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        let claims = Claims::with_expiration(1, Duration::seconds(-3600));

        let token = create_token(&claims, SECRET).expect("Should create token");
        let result = validate_token(&token, SECRET);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_just_expired_token() {
        let token = issue_token(1, Duration::seconds(-5), SECRET).unwrap();

        assert!(matches!(validate_token(&token, SECRET), Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_after_seven_days() {
        // Issued eight days ago with the default lifetime
        let claims = Claims::with_expiration(1, Duration::days(DEFAULT_TOKEN_TTL_DAYS - 8));
        let token = create_token(&claims, SECRET).unwrap();

        assert!(matches!(verify_token(&token, SECRET), Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_wrong_issuer() {
        let mut claims = Claims::new(1);
        claims.iss = "someone-else".to_string();
        let token = create_token(&claims, SECRET).unwrap();

        assert!(matches!(
            validate_token(&token, SECRET),
            Err(JwtError::InvalidIssuer { .. })
        ));
    }

    #[test]
    fn test_validate_garbage() {
        assert!(validate_token("not.a.jwt", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
    }

    #[test]
    fn test_non_numeric_subject() {
        let mut claims = Claims::new(1);
        claims.sub = "alice".to_string();
        let token = create_token(&claims, SECRET).unwrap();

        assert!(matches!(
            verify_token(&token, SECRET),
            Err(JwtError::InvalidFormat(_))
        ));
    }
}
