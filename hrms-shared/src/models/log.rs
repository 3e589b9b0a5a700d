/// Audit log model
///
/// Append-only record of user-triggered actions. A log row is written after
/// the mutation it describes succeeds; rows are never updated or deleted by
/// the application. The `meta` column holds a structured JSON payload whose
/// shape varies per action tag.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE logs (
///     id BIGSERIAL PRIMARY KEY,
///     organisation_id BIGINT,
///     user_id BIGINT,
///     action TEXT NOT NULL,
///     meta JSONB,
///     timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;

/// Audit log row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Log {
    /// Unique log ID
    pub id: i64,

    /// Organisation scope (nullable: some actions predate any tenant)
    pub organisation_id: Option<i64>,

    /// Acting user (nullable)
    pub user_id: Option<i64>,

    /// Free-form action tag, e.g. "employee_created"
    pub action: String,

    /// Structured metadata for the action
    pub meta: Option<Value>,

    /// When the action happened
    pub timestamp: DateTime<Utc>,
}

impl Log {
    /// Appends a log row
    ///
    /// Called after the mutation it describes; a failure here propagates to
    /// the caller but the mutation itself is not rolled back (there is no
    /// cross-statement transaction).
    pub async fn record(
        pool: &PgPool,
        organisation_id: Option<i64>,
        user_id: Option<i64>,
        action: &str,
        meta: Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO logs (organisation_id, user_id, action, meta)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(organisation_id)
        .bind(user_id)
        .bind(action)
        .bind(meta)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Lists the most recent log rows for an organisation, newest first
    ///
    /// Returns at most `limit` rows. There is no offset pagination; the
    /// contract is "most recent N".
    pub async fn list_recent(
        pool: &PgPool,
        organisation_id: i64,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let logs = sqlx::query_as::<_, Log>(
            r#"
            SELECT id, organisation_id, user_id, action, meta, timestamp
            FROM logs
            WHERE organisation_id = $1
            ORDER BY timestamp DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(organisation_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(logs)
    }
}
