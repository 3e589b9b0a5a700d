/// User model and database operations
///
/// Users are login principals, distinct from the employee records they
/// manage. Each user belongs to exactly one organisation; emails are unique
/// across all organisations (the registration duplicate check is global, not
/// per-tenant).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     organisation_id BIGINT NOT NULL REFERENCES organisations(id),
///     email TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     name TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use hrms_shared::models::user::{User, CreateUser};
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     organisation_id: 1,
///     email: "admin@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     name: Some("Admin".to_string()),
/// }).await?;
///
/// let found = User::find_by_email(&pool, "admin@example.com").await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User row
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Owning organisation
    pub organisation_id: i64,

    /// Email address, unique across all organisations
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Display name
    pub name: Option<String>,

    /// When the user account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Owning organisation
    pub organisation_id: i64,

    /// Email address
    pub email: String,

    /// Argon2id password hash (not the plaintext password)
    pub password_hash: String,

    /// Display name
    pub name: Option<String>,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint
    /// violation) or the database is unavailable.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (organisation_id, email, password_hash, name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, organisation_id, email, password_hash, name, created_at
            "#,
        )
        .bind(data.organisation_id)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Deliberately not tenant-scoped: used for the global registration
    /// uniqueness check and for login, both of which happen before any
    /// organisation context exists.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, organisation_id, email, password_hash, name, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, organisation_id, email, password_hash, name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            organisation_id: 1,
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
            name: Some("Test User".to_string()),
        };

        assert_eq!(create_user.organisation_id, 1);
        assert_eq!(create_user.email, "test@example.com");
    }

    // Database-backed tests live in hrms-api/tests/
}
