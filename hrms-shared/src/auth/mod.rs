/// Authentication utilities
///
/// This module provides the authentication primitives for the HRMS API:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Signed session token generation and validation
/// - [`middleware`]: The auth context injected into authenticated requests
///
/// # Example
///
/// ```no_run
/// use hrms_shared::auth::password::{hash_password, verify_password};
/// use hrms_shared::auth::jwt::{create_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(1, 1, "admin@example.com".to_string());
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```
pub mod jwt;
pub mod middleware;
pub mod password;
