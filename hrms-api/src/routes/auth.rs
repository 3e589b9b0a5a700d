/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Create an organisation and its admin user
/// - `POST /api/auth/login` - Authenticate and get a session token
/// - `POST /api/auth/logout` - Record a logout (token discard is client-side)
///
/// Registration and login are the only endpoints that skip the auth gate.
/// Tokens carry `{userId, orgId, email}` and are valid for 7 days; there is
/// no server-side revocation, so logout only writes an audit entry.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use hrms_shared::{
    auth::{jwt, middleware::AuthContext, password},
    models::{
        log::Log,
        organisation::Organisation,
        user::{CreateUser, User},
    },
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use super::MessageResponse;

/// Register request
///
/// Fields are optional at the deserialization layer so that a missing field
/// produces the contract's 400 response rather than a deserialization
/// rejection.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Organisation name
    pub org_name: Option<String>,

    /// Admin display name (defaults to "Admin")
    pub admin_name: Option<String>,

    /// Admin email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// Admin password
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: Option<String>,

    /// Password
    pub password: Option<String>,
}

/// User details returned with a token
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// User ID
    pub id: i64,

    /// Display name
    pub name: Option<String>,

    /// Email address
    pub email: String,

    /// Owning organisation ID
    pub organisation_id: i64,

    /// Owning organisation name
    pub organisation_name: String,
}

/// Register / login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Always true for success responses
    pub success: bool,

    /// Human-readable outcome description
    pub message: String,

    /// Signed session token (7-day validity)
    pub token: String,

    /// The authenticated user
    pub user: UserInfo,
}

/// Register a new organisation and its admin user
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// {
///   "orgName": "Acme",
///   "adminName": "Ada",
///   "email": "a@x.com",
///   "password": "secret123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing organisation name, email, or password; or a
///   user with that email already exists (uniqueness is global, not
///   per-tenant)
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let (Some(org_name), Some(email), Some(password)) =
        (req.org_name.clone(), req.email.clone(), req.password.clone())
    else {
        return Err(ApiError::BadRequest(
            "Organisation name, email, and password are required".to_string(),
        ));
    };

    req.validate().map_err(|e| {
        let errors: Vec<ValidationErrorDetail> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        ApiError::Validation(errors)
    })?;

    // Email uniqueness is global: one email, one user, whatever the tenant
    if User::find_by_email(&state.db, &email).await?.is_some() {
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let org = Organisation::create(&state.db, &org_name).await?;

    let password_hash = password::hash_password(&password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            organisation_id: org.id,
            email,
            password_hash,
            name: Some(req.admin_name.unwrap_or_else(|| "Admin".to_string())),
        },
    )
    .await?;

    Log::record(
        &state.db,
        Some(org.id),
        Some(user.id),
        "organisation_created",
        json!({
            "organisationId": org.id,
            "organisationName": org_name,
        }),
    )
    .await?;

    let claims = jwt::Claims::new(user.id, org.id, user.email.clone());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: "Organisation and admin user created successfully".to_string(),
            token,
            user: UserInfo {
                id: user.id,
                name: user.name,
                email: user.email,
                organisation_id: org.id,
                organisation_name: org.name,
            },
        }),
    ))
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "a@x.com",
///   "password": "secret123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing email or password
/// - `401 Unauthorized`: Unknown email or wrong password; the message is
///   the same either way so callers cannot enumerate users
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify_password(&password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let org = Organisation::find_by_id(&state.db, user.organisation_id)
        .await?
        .ok_or_else(|| ApiError::Internal("User has no organisation".to_string()))?;

    Log::record(
        &state.db,
        Some(user.organisation_id),
        Some(user.id),
        "user_login",
        json!({
            "userId": user.id,
            "email": user.email,
        }),
    )
    .await?;

    let claims = jwt::Claims::new(user.id, user.organisation_id, user.email.clone());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        user: UserInfo {
            id: user.id,
            name: user.name,
            email: user.email,
            organisation_id: user.organisation_id,
            organisation_name: org.name,
        },
    }))
}

/// Logout endpoint
///
/// Stateless: tokens are not revoked server-side, so this only records the
/// audit entry. The client discards its token.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<MessageResponse>> {
    Log::record(
        &state.db,
        Some(auth.org_id),
        Some(auth.user_id),
        "user_logout",
        json!({ "userId": auth.user_id }),
    )
    .await?;

    Ok(Json(MessageResponse::new("Logout successful")))
}
