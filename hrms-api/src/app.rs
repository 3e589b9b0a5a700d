/// Application state and router builder
///
/// Defines the shared application state and builds the axum router with all
/// routes and middleware.
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                    # Health check (public)
/// └── /api/
///     ├── /auth/
///     │   ├── POST /register     # Public
///     │   ├── POST /login        # Public
///     │   └── POST /logout       # Authenticated
///     ├── /employees/            # Authenticated CRUD
///     ├── /teams/                # Authenticated CRUD + assign/unassign
///     └── /logs/                 # Authenticated, read-only
/// ```
///
/// Every route outside register/login/health sits behind the auth gate,
/// which validates the bearer token and injects an [`AuthContext`] into the
/// request extensions. Handlers take their organisation scope from that
/// context only.
use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Json, Router,
};
use hrms_shared::auth::{
    jwt::{self, JwtError},
    middleware::{AuthContext, AuthError},
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into each request handler via axum's `State` extractor; `Arc`
/// keeps the clone cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// JWT signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Register and login are the only endpoints reachable without a token
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route(
            "/logout",
            post(routes::auth::logout).layer(axum::middleware::from_fn_with_state(
                state.clone(),
                auth_layer,
            )),
        );

    let employee_routes = Router::new()
        .route("/", get(routes::employees::list_employees))
        .route("/", post(routes::employees::create_employee))
        .route("/:id", get(routes::employees::get_employee))
        .route("/:id", put(routes::employees::update_employee))
        .route("/:id", delete(routes::employees::delete_employee))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_layer,
        ));

    let team_routes = Router::new()
        .route("/", get(routes::teams::list_teams))
        .route("/", post(routes::teams::create_team))
        .route("/:id", get(routes::teams::get_team))
        .route("/:id", put(routes::teams::update_team))
        .route("/:id", delete(routes::teams::delete_team))
        .route("/:id/assign", post(routes::teams::assign_employee))
        .route("/:id/unassign", post(routes::teams::unassign_employee))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_layer,
        ));

    let log_routes = Router::new()
        .route("/", get(routes::logs::list_logs))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_layer,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/employees", employee_routes)
        .nest("/teams", team_routes)
        .nest("/logs", log_routes);

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Fallback for unmatched routes
async fn route_not_found() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route not found" })),
    )
}

/// Auth gate
///
/// Extracts the bearer token from the Authorization header, validates it,
/// and injects [`AuthContext`] into the request extensions. Downstream
/// handlers must take their organisation scope from this context; an
/// organisation id in a request body is never trusted.
async fn auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = jwt::validate_token(token, state.jwt_secret()).map_err(|e| match e {
        JwtError::Expired => AuthError::TokenExpired,
        JwtError::ValidationError(_) | JwtError::InvalidIssuer => AuthError::InvalidToken,
        JwtError::CreateError(_) => AuthError::Internal,
    })?;

    req.extensions_mut().insert(AuthContext::from_claims(&claims));

    Ok(next.run(req).await)
}
