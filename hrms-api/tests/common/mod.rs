/// Common test utilities for integration tests
///
/// Provides a test context that connects to the database named by
/// `TEST_DATABASE_URL`, runs migrations, and builds the router. Tests that
/// need the database call [`TestContext::try_new`] and skip themselves when
/// the variable is unset, so the suite stays green on machines without
/// Postgres.
use axum::body::Body;
use axum::http::{Request, StatusCode};
use hrms_api::app::{build_router, AppState};
use hrms_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt as _;

/// Signing secret used by all tests
pub const TEST_JWT_SECRET: &str = "integration-test-secret-key-32-bytes!";

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Produces a unique suffix for emails and names so parallel tests never
/// collide on the global email uniqueness constraint.
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", nanos, n)
}

/// Test context containing the database pool and the router under test
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a test context, or `None` when `TEST_DATABASE_URL` is unset
    pub async fn try_new() -> Option<Self> {
        dotenvy::dotenv().ok();
        let url = std::env::var("TEST_DATABASE_URL").ok()?;

        let db = PgPool::connect(&url)
            .await
            .expect("failed to connect to TEST_DATABASE_URL");

        // Path relative to the hrms-api crate root
        sqlx::migrate!("../hrms-shared/migrations")
            .run(&db)
            .await
            .expect("migrations failed");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Some(Self { db, app })
    }

    /// Sends a request through the router and returns status plus parsed body
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Registers a fresh organisation and returns its session token
    pub async fn register_org(&self, org_name: &str) -> String {
        let email = format!("admin-{}@example.com", unique_suffix());
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "orgName": org_name,
                    "adminName": "Admin",
                    "email": email,
                    "password": "secret123",
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Creates an employee and returns its id
    pub async fn create_employee(&self, token: &str, first: &str, last: &str) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/employees",
                Some(token),
                Some(serde_json::json!({ "first_name": first, "last_name": last })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "create employee failed: {}", body);
        body["data"]["id"].as_i64().unwrap()
    }

    /// Creates a team and returns its id
    pub async fn create_team(&self, token: &str, name: &str) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/teams",
                Some(token),
                Some(serde_json::json!({ "name": name })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "create team failed: {}", body);
        body["data"]["id"].as_i64().unwrap()
    }
}

/// Skips the calling test when no test database is configured
#[macro_export]
macro_rules! require_db {
    () => {
        match common::TestContext::try_new().await {
            Some(ctx) => ctx,
            None => {
                eprintln!("skipping: TEST_DATABASE_URL not set");
                return;
            }
        }
    };
}
