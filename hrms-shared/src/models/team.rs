/// Team model and the employee/team join table
///
/// Teams are tenant-scoped like employees. The many-to-many assignment
/// between employees and teams lives in the `employee_teams` join table,
/// whose `UNIQUE (employee_id, team_id)` constraint is the single source of
/// truth for "already assigned": the insert uses ON CONFLICT DO NOTHING and
/// a zero row count is the benign duplicate outcome, not an error.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE teams (
///     id BIGSERIAL PRIMARY KEY,
///     organisation_id BIGINT NOT NULL REFERENCES organisations(id),
///     name TEXT NOT NULL,
///     description TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE employee_teams (
///     id BIGSERIAL PRIMARY KEY,
///     employee_id BIGINT NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
///     team_id BIGINT NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
///     assigned_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (employee_id, team_id)
/// );
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::employee::Employee;

/// Team row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    /// Unique team ID
    pub id: i64,

    /// Owning organisation
    pub organisation_id: i64,

    /// Team name
    pub name: String,

    /// Team description
    pub description: Option<String>,

    /// When the team was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeam {
    /// Team name
    pub name: String,

    /// Team description
    pub description: Option<String>,
}

/// Partial update for a team
///
/// Same semantics as employees: `None` keeps the stored value, `Some(value)`
/// replaces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTeam {
    /// New team name
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,
}

impl UpdateTeam {
    /// Resolves this partial update against the stored row
    pub fn merge(&self, existing: &Team) -> (String, Option<String>) {
        (
            self.name.clone().unwrap_or_else(|| existing.name.clone()),
            self.description
                .clone()
                .or_else(|| existing.description.clone()),
        )
    }
}

impl Team {
    /// Creates a new team in the caller's organisation
    pub async fn create(
        pool: &PgPool,
        organisation_id: i64,
        data: CreateTeam,
    ) -> Result<Self, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (organisation_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, organisation_id, name, description, created_at
            "#,
        )
        .bind(organisation_id)
        .bind(data.name)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(team)
    }

    /// Lists all teams of an organisation
    pub async fn list(pool: &PgPool, organisation_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, organisation_id, name, description, created_at
            FROM teams
            WHERE organisation_id = $1
            ORDER BY id
            "#,
        )
        .bind(organisation_id)
        .fetch_all(pool)
        .await?;

        Ok(teams)
    }

    /// Finds a team by ID within the caller's organisation
    pub async fn find_by_id(
        pool: &PgPool,
        id: i64,
        organisation_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, organisation_id, name, description, created_at
            FROM teams
            WHERE id = $1 AND organisation_id = $2
            "#,
        )
        .bind(id)
        .bind(organisation_id)
        .fetch_optional(pool)
        .await?;

        Ok(team)
    }

    /// Applies a partial update to a team
    pub async fn update(
        pool: &PgPool,
        id: i64,
        organisation_id: i64,
        data: UpdateTeam,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id, organisation_id).await? else {
            return Ok(None);
        };

        let (name, description) = data.merge(&existing);

        let team = sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET name = $3, description = $4
            WHERE id = $1 AND organisation_id = $2
            RETURNING id, organisation_id, name, description, created_at
            "#,
        )
        .bind(id)
        .bind(organisation_id)
        .bind(name)
        .bind(description)
        .fetch_optional(pool)
        .await?;

        Ok(team)
    }

    /// Deletes a team
    ///
    /// The ON DELETE CASCADE on employee_teams removes its assignment rows.
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: i64, organisation_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1 AND organisation_id = $2")
            .bind(id)
            .bind(organisation_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the employees assigned to a team
    pub async fn members(
        pool: &PgPool,
        team_id: i64,
        organisation_id: i64,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT e.id, e.organisation_id, e.first_name, e.last_name, e.email, e.phone, e.created_at
            FROM employees e
            INNER JOIN employee_teams et ON e.id = et.employee_id
            WHERE et.team_id = $1 AND e.organisation_id = $2
            ORDER BY e.id
            "#,
        )
        .bind(team_id)
        .bind(organisation_id)
        .fetch_all(pool)
        .await?;

        Ok(employees)
    }

    /// Assigns an employee to a team
    ///
    /// Returns false when the pair already exists: the uniqueness constraint
    /// absorbs the duplicate via ON CONFLICT DO NOTHING and the zero row
    /// count is reported as "already assigned". Any other database failure
    /// surfaces as an error.
    ///
    /// Callers are responsible for verifying that both the team and the
    /// employee belong to the caller's organisation before assigning.
    pub async fn assign_employee(
        pool: &PgPool,
        team_id: i64,
        employee_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO employee_teams (team_id, employee_id)
            VALUES ($1, $2)
            ON CONFLICT (employee_id, team_id) DO NOTHING
            "#,
        )
        .bind(team_id)
        .bind(employee_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes an employee from a team
    ///
    /// Returns false when no such assignment row exists.
    pub async fn unassign_employee(
        pool: &PgPool,
        team_id: i64,
        employee_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM employee_teams WHERE team_id = $1 AND employee_id = $2")
                .bind(team_id)
                .bind(employee_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_team_merge() {
        let existing = Team {
            id: 1,
            organisation_id: 1,
            name: "Eng".to_string(),
            description: Some("Engineering".to_string()),
            created_at: Utc::now(),
        };

        let update = UpdateTeam {
            description: Some(String::new()),
            ..Default::default()
        };
        let (name, description) = update.merge(&existing);
        assert_eq!(name, "Eng");
        assert_eq!(description.as_deref(), Some(""));

        let update = UpdateTeam::default();
        let (name, description) = update.merge(&existing);
        assert_eq!(name, "Eng");
        assert_eq!(description.as_deref(), Some("Engineering"));
    }
}
