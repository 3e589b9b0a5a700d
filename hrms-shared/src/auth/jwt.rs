/// Session token generation and validation
///
/// Tokens are signed using HS256 (HMAC-SHA256) and carry the caller's
/// identity: user id, organisation id, and email. Every authenticated
/// request presents one of these as a bearer token.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 7 days from issue
/// - **Validation**: Signature, expiration, and issuer checks
/// - **Secret Management**: Secrets should be at least 32 bytes (256 bits)
///
/// # Example
///
/// ```
/// use hrms_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new(42, 7, "admin@example.com".to_string());
/// let token = create_token(&claims, "your-secret-key")?;
///
/// let validated = validate_token(&token, "your-secret-key")?;
/// assert_eq!(validated.sub, 42);
/// assert_eq!(validated.org_id, 7);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer embedded in every token
const ISSUER: &str = "hrms";

/// Session token validity window
pub const TOKEN_VALIDITY_DAYS: i64 = 7;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token (bad signature, malformed, wrong claims)
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid issuer")]
    InvalidIssuer,
}

/// Claims carried by a session token
///
/// # Standard Claims
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer (always "hrms")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
///
/// # Custom Claims
///
/// - `org_id`: The caller's organisation (tenant scope for every query)
/// - `email`: The caller's email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: i64,

    /// Issuer - always "hrms"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Organisation ID (custom claim)
    pub org_id: i64,

    /// Email address (custom claim)
    pub email: String,
}

impl Claims {
    /// Creates new claims with the standard 7-day validity window
    pub fn new(user_id: i64, org_id: i64, email: String) -> Self {
        Self::with_expiration(user_id, org_id, email, Duration::days(TOKEN_VALIDITY_DAYS))
    }

    /// Creates claims with a custom validity window
    ///
    /// Used by tests to mint already-expired tokens.
    pub fn with_expiration(user_id: i64, org_id: i64, email: String, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            org_id,
            email,
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed session token from claims
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a session token and extracts its claims
///
/// Verifies:
/// - Signature is valid
/// - Token hasn't expired
/// - Issuer is "hrms"
/// - Token is not used before its nbf time
///
/// # Errors
///
/// - `JwtError::Expired` when past the validity window
/// - `JwtError::InvalidIssuer` when issued by someone else
/// - `JwtError::ValidationError` for signature or format failures
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| {
        use jsonwebtoken::errors::ErrorKind;
        match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
            _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
        }
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_token_roundtrip() {
        let claims = Claims::new(1, 2, "user@example.com".to_string());
        let token = create_token(&claims, SECRET).unwrap();

        let validated = validate_token(&token, SECRET).unwrap();
        assert_eq!(validated.sub, 1);
        assert_eq!(validated.org_id, 2);
        assert_eq!(validated.email, "user@example.com");
        assert_eq!(validated.iss, "hrms");
    }

    #[test]
    fn test_default_validity_is_seven_days() {
        let claims = Claims::new(1, 1, "user@example.com".to_string());
        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, Duration::days(7).num_seconds());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = Claims::new(1, 1, "user@example.com".to_string());
        let token = create_token(&claims, SECRET).unwrap();

        let result = validate_token(&token, "a-completely-different-secret-key!!");
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::with_expiration(
            1,
            1,
            "user@example.com".to_string(),
            Duration::seconds(-120),
        );
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).unwrap();
        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let claims = Claims::new(1, 1, "user@example.com".to_string());
        let token = create_token(&claims, SECRET).unwrap();

        // Flip a character in the payload segment
        let mut tampered = token.clone();
        let mid = tampered.len() / 2;
        let replacement = if tampered.as_bytes()[mid] == b'A' { "B" } else { "A" };
        tampered.replace_range(mid..mid + 1, replacement);

        assert!(validate_token(&tampered, SECRET).is_err());
    }
}
