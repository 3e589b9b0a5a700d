/// Auth context for authenticated requests
///
/// The API's auth layer validates the bearer token on every protected
/// endpoint and inserts an `AuthContext` into the request extensions.
/// Handlers extract it with axum's `Extension` extractor and must use its
/// `org_id` as the tenant scope for every domain call; an organisation id
/// supplied in a request body is never trusted.
///
/// # Example
///
/// ```
/// use hrms_shared::auth::jwt::Claims;
/// use hrms_shared::auth::middleware::AuthContext;
///
/// let claims = Claims::new(1, 7, "admin@example.com".to_string());
/// let ctx = AuthContext::from_claims(&claims);
/// assert_eq!(ctx.org_id, 7);
/// ```
use serde::{Deserialize, Serialize};

use super::jwt::Claims;

/// Error cases the auth gate distinguishes
///
/// Each maps to the message the API returns: missing or invalid or expired
/// tokens are 401, anything else during verification is 500.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No bearer token on the request
    #[error("No token provided")]
    MissingToken,

    /// Signature or format verification failed
    #[error("Invalid token")]
    InvalidToken,

    /// Token past its validity window
    #[error("Token expired")]
    TokenExpired,

    /// Any other verification failure
    #[error("Authentication error")]
    Internal,
}

/// Caller identity attached to every authenticated request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: i64,

    /// The caller's organisation; tenant scope for all downstream queries
    pub org_id: i64,

    /// The caller's email
    pub email: String,
}

impl AuthContext {
    /// Builds the context from validated token claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            org_id: claims.org_id,
            email: claims.email.clone(),
        }
    }
}
