/// Organisation model
///
/// The organisation is the tenant isolation root: every user, employee, and
/// team row carries its id. Organisations are created exactly once, together
/// with their admin user at registration, and are never deleted by the
/// application.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE organisations (
///     id BIGSERIAL PRIMARY KEY,
///     name TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Organisation row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organisation {
    /// Unique organisation ID
    pub id: i64,

    /// Organisation name
    pub name: String,

    /// When the organisation was created
    pub created_at: DateTime<Utc>,
}

impl Organisation {
    /// Creates a new organisation
    pub async fn create(pool: &PgPool, name: &str) -> Result<Self, sqlx::Error> {
        let org = sqlx::query_as::<_, Organisation>(
            r#"
            INSERT INTO organisations (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(org)
    }

    /// Finds an organisation by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let org = sqlx::query_as::<_, Organisation>(
            r#"
            SELECT id, name, created_at
            FROM organisations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(org)
    }
}
