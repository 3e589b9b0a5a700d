/// Employee model and database operations
///
/// Employees are managed HR records, not login principals: they have no
/// password and cannot authenticate. Every read, update, and delete is
/// scoped by the caller's organisation id, so a row belonging to another
/// organisation behaves exactly like a missing one.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE employees (
///     id BIGSERIAL PRIMARY KEY,
///     organisation_id BIGINT NOT NULL REFERENCES organisations(id),
///     first_name TEXT,
///     last_name TEXT,
///     email TEXT,
///     phone TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use hrms_shared::models::employee::{Employee, CreateEmployee, UpdateEmployee};
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let employee = Employee::create(&pool, 1, CreateEmployee {
///     first_name: "Jo".to_string(),
///     last_name: "Doe".to_string(),
///     email: None,
///     phone: None,
/// }).await?;
///
/// // Partial update: only the phone changes
/// let update = UpdateEmployee {
///     phone: Some("555-0100".to_string()),
///     ..Default::default()
/// };
/// Employee::update(&pool, employee.id, 1, update).await?;
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::team::Team;

/// Employee row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    /// Unique employee ID
    pub id: i64,

    /// Owning organisation
    pub organisation_id: i64,

    /// First name
    pub first_name: Option<String>,

    /// Last name
    pub last_name: Option<String>,

    /// Contact email (optional; employees are not login principals)
    pub email: Option<String>,

    /// Contact phone
    pub phone: Option<String>,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new employee
///
/// First and last name are required by the handler; email and phone are
/// optional contact fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployee {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Contact email
    pub email: Option<String>,

    /// Contact phone
    pub phone: Option<String>,
}

/// Partial update for an employee
///
/// `None` keeps the stored value; `Some(value)` replaces it, including
/// `Some("")` which clears the field to an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmployee {
    /// New first name
    pub first_name: Option<String>,

    /// New last name
    pub last_name: Option<String>,

    /// New contact email
    pub email: Option<String>,

    /// New contact phone
    pub phone: Option<String>,
}

impl UpdateEmployee {
    /// Resolves this partial update against the stored row
    ///
    /// Returns the concrete column values for the UPDATE statement:
    /// submitted fields win, omitted fields keep their stored value.
    pub fn merge(
        &self,
        existing: &Employee,
    ) -> (Option<String>, Option<String>, Option<String>, Option<String>) {
        (
            self.first_name.clone().or_else(|| existing.first_name.clone()),
            self.last_name.clone().or_else(|| existing.last_name.clone()),
            self.email.clone().or_else(|| existing.email.clone()),
            self.phone.clone().or_else(|| existing.phone.clone()),
        )
    }

    /// True when every field is omitted
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}

impl Employee {
    /// Creates a new employee in the caller's organisation
    pub async fn create(
        pool: &PgPool,
        organisation_id: i64,
        data: CreateEmployee,
    ) -> Result<Self, sqlx::Error> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (organisation_id, first_name, last_name, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, organisation_id, first_name, last_name, email, phone, created_at
            "#,
        )
        .bind(organisation_id)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.email)
        .bind(data.phone)
        .fetch_one(pool)
        .await?;

        Ok(employee)
    }

    /// Lists all employees of an organisation
    pub async fn list(pool: &PgPool, organisation_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, organisation_id, first_name, last_name, email, phone, created_at
            FROM employees
            WHERE organisation_id = $1
            ORDER BY id
            "#,
        )
        .bind(organisation_id)
        .fetch_all(pool)
        .await?;

        Ok(employees)
    }

    /// Finds an employee by ID within the caller's organisation
    ///
    /// A foreign employee id yields `None`, same as a missing one.
    pub async fn find_by_id(
        pool: &PgPool,
        id: i64,
        organisation_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, organisation_id, first_name, last_name, email, phone, created_at
            FROM employees
            WHERE id = $1 AND organisation_id = $2
            "#,
        )
        .bind(id)
        .bind(organisation_id)
        .fetch_optional(pool)
        .await?;

        Ok(employee)
    }

    /// Applies a partial update to an employee
    ///
    /// Returns the updated row, or `None` if the employee is missing or
    /// belongs to another organisation.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        organisation_id: i64,
        data: UpdateEmployee,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id, organisation_id).await? else {
            return Ok(None);
        };

        let (first_name, last_name, email, phone) = data.merge(&existing);

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET first_name = $3, last_name = $4, email = $5, phone = $6
            WHERE id = $1 AND organisation_id = $2
            RETURNING id, organisation_id, first_name, last_name, email, phone, created_at
            "#,
        )
        .bind(id)
        .bind(organisation_id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone)
        .fetch_optional(pool)
        .await?;

        Ok(employee)
    }

    /// Deletes an employee
    ///
    /// The ON DELETE CASCADE on employee_teams removes its assignment rows.
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: i64, organisation_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1 AND organisation_id = $2")
            .bind(id)
            .bind(organisation_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the teams this employee is assigned to
    pub async fn teams(
        pool: &PgPool,
        employee_id: i64,
        organisation_id: i64,
    ) -> Result<Vec<Team>, sqlx::Error> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT t.id, t.organisation_id, t.name, t.description, t.created_at
            FROM teams t
            INNER JOIN employee_teams et ON t.id = et.team_id
            WHERE et.employee_id = $1 AND t.organisation_id = $2
            ORDER BY t.id
            "#,
        )
        .bind(employee_id)
        .bind(organisation_id)
        .fetch_all(pool)
        .await?;

        Ok(teams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing() -> Employee {
        Employee {
            id: 1,
            organisation_id: 1,
            first_name: Some("Jo".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("jo@example.com".to_string()),
            phone: Some("555-0100".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_merge_empty_update_keeps_everything() {
        let update = UpdateEmployee::default();
        assert!(update.is_empty());

        let (first, last, email, phone) = update.merge(&existing());
        assert_eq!(first.as_deref(), Some("Jo"));
        assert_eq!(last.as_deref(), Some("Doe"));
        assert_eq!(email.as_deref(), Some("jo@example.com"));
        assert_eq!(phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_merge_submitted_fields_win() {
        let update = UpdateEmployee {
            first_name: Some("Joanna".to_string()),
            ..Default::default()
        };

        let (first, last, ..) = update.merge(&existing());
        assert_eq!(first.as_deref(), Some("Joanna"));
        assert_eq!(last.as_deref(), Some("Doe"));
    }

    #[test]
    fn test_merge_empty_string_clears_field() {
        let update = UpdateEmployee {
            email: Some(String::new()),
            ..Default::default()
        };

        let (_, _, email, phone) = update.merge(&existing());
        assert_eq!(email.as_deref(), Some(""));
        assert_eq!(phone.as_deref(), Some("555-0100"));
    }
}
