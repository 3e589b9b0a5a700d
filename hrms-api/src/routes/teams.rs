/// Team endpoints
///
/// # Endpoints
///
/// - `GET /api/teams` - List teams with members and member counts
/// - `GET /api/teams/:id` - Get one team
/// - `POST /api/teams` - Create team
/// - `PUT /api/teams/:id` - Partial update
/// - `DELETE /api/teams/:id` - Delete (cascades assignments)
/// - `POST /api/teams/:id/assign` - Assign one employee or a batch
/// - `POST /api/teams/:id/unassign` - Remove one assignment
///
/// Assignment is the one place a storage conflict is a normal outcome: the
/// join table's uniqueness constraint turns a duplicate assign into a
/// per-item "Already assigned" result instead of an error.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use hrms_shared::{
    auth::middleware::AuthContext,
    models::{
        employee::Employee,
        log::Log,
        team::{CreateTeam, Team, UpdateTeam},
    },
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{DataResponse, MessageResponse};

/// Create team request
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    /// Team name (required)
    pub name: Option<String>,

    /// Team description
    pub description: Option<String>,
}

/// Partial update request; omitted fields keep their stored value
#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    /// New team name
    pub name: Option<String>,

    /// New description (empty string clears)
    pub description: Option<String>,
}

/// Assign request: a single employee id or a batch
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    /// Single employee to assign
    pub employee_id: Option<i64>,

    /// Batch of employees to assign (takes precedence when present)
    pub employee_ids: Option<Vec<i64>>,
}

/// Unassign request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignRequest {
    /// Employee to remove from the team
    pub employee_id: Option<i64>,
}

/// Per-employee outcome of an assign operation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignResult {
    /// The employee this result is about
    pub employee_id: i64,

    /// Whether a new assignment row was created
    pub success: bool,

    /// Failure reason ("Employee not found" / "Already assigned")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Assign response
#[derive(Debug, Serialize)]
pub struct AssignResponse {
    /// True: the operation ran; per-item failures live in `results`
    pub success: bool,

    /// Human-readable outcome description
    pub message: String,

    /// One entry per requested employee id, in request order
    pub results: Vec<AssignResult>,
}

/// Team annotated with its members
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamWithMembers {
    /// The team record
    #[serde(flatten)]
    pub team: Team,

    /// Number of assigned employees
    pub employee_count: usize,

    /// The assigned employees
    pub employees: Vec<Employee>,
}

/// List all teams of the caller's organisation
///
/// Each team is annotated with its member list and member count.
pub async fn list_teams(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<DataResponse<Vec<TeamWithMembers>>>> {
    let teams = Team::list(&state.db, auth.org_id).await?;

    let mut data = Vec::with_capacity(teams.len());
    for team in teams {
        let employees = Team::members(&state.db, team.id, auth.org_id).await?;
        data.push(TeamWithMembers {
            team,
            employee_count: employees.len(),
            employees,
        });
    }

    Ok(Json(DataResponse::new(data)))
}

/// Get one team
///
/// # Errors
///
/// - `404 Not Found`: Missing or foreign team id
pub async fn get_team(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DataResponse<TeamWithMembers>>> {
    let team = Team::find_by_id(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    let employees = Team::members(&state.db, id, auth.org_id).await?;

    Ok(Json(DataResponse::new(TeamWithMembers {
        team,
        employee_count: employees.len(),
        employees,
    })))
}

/// Create a team
///
/// # Errors
///
/// - `400 Bad Request`: Missing team name
pub async fn create_team(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTeamRequest>,
) -> ApiResult<(StatusCode, Json<DataResponse<Team>>)> {
    let Some(name) = req.name else {
        return Err(ApiError::BadRequest("Team name is required".to_string()));
    };

    let team = Team::create(
        &state.db,
        auth.org_id,
        CreateTeam {
            name: name.clone(),
            description: req.description,
        },
    )
    .await?;

    Log::record(
        &state.db,
        Some(auth.org_id),
        Some(auth.user_id),
        "team_created",
        json!({
            "teamId": team.id,
            "name": name,
        }),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message("Team created successfully", team)),
    ))
}

/// Partially update a team
///
/// # Errors
///
/// - `404 Not Found`: Missing or foreign team id
pub async fn update_team(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTeamRequest>,
) -> ApiResult<Json<DataResponse<Team>>> {
    let changes = json!({
        "name": req.name,
        "description": req.description,
    });

    let update = UpdateTeam {
        name: req.name,
        description: req.description,
    };

    let team = Team::update(&state.db, id, auth.org_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    Log::record(
        &state.db,
        Some(auth.org_id),
        Some(auth.user_id),
        "team_updated",
        json!({
            "teamId": id,
            "changes": changes,
        }),
    )
    .await?;

    Ok(Json(DataResponse::with_message(
        "Team updated successfully",
        team,
    )))
}

/// Delete a team
///
/// Assignment rows go with it via the join table's cascade.
///
/// # Errors
///
/// - `404 Not Found`: Missing or foreign team id
pub async fn delete_team(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let team = Team::find_by_id(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    let deleted = Team::delete(&state.db, id, auth.org_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Team not found".to_string()));
    }

    Log::record(
        &state.db,
        Some(auth.org_id),
        Some(auth.user_id),
        "team_deleted",
        json!({
            "teamId": id,
            "name": team.name,
        }),
    )
    .await?;

    Ok(Json(MessageResponse::new("Team deleted successfully")))
}

/// Assign one employee or a batch to a team
///
/// Per-item failures are collected, not raised: a foreign or missing
/// employee yields a "Employee not found" result, an existing pair yields
/// "Already assigned", and the remaining items still proceed. One audit
/// entry is written per successful assignment.
///
/// # Errors
///
/// - `400 Bad Request`: No employee id(s) in the body
/// - `404 Not Found`: Missing or foreign team id
pub async fn assign_employee(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(team_id): Path<i64>,
    Json(req): Json<AssignRequest>,
) -> ApiResult<Json<AssignResponse>> {
    let team = Team::find_by_id(&state.db, team_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    let ids = match (req.employee_ids, req.employee_id) {
        (Some(ids), _) if !ids.is_empty() => ids,
        (_, Some(id)) => vec![id],
        _ => {
            return Err(ApiError::BadRequest("Employee ID(s) required".to_string()));
        }
    };

    let mut results = Vec::with_capacity(ids.len());

    for employee_id in ids {
        let Some(employee) = Employee::find_by_id(&state.db, employee_id, auth.org_id).await? else {
            results.push(AssignResult {
                employee_id,
                success: false,
                message: Some("Employee not found".to_string()),
            });
            continue;
        };

        let assigned = Team::assign_employee(&state.db, team_id, employee_id).await?;

        if assigned {
            Log::record(
                &state.db,
                Some(auth.org_id),
                Some(auth.user_id),
                "employee_assigned_to_team",
                json!({
                    "employeeId": employee_id,
                    "teamId": team_id,
                    "employeeName": format!(
                        "{} {}",
                        employee.first_name.as_deref().unwrap_or(""),
                        employee.last_name.as_deref().unwrap_or("")
                    ),
                    "teamName": team.name,
                }),
            )
            .await?;

            results.push(AssignResult {
                employee_id,
                success: true,
                message: None,
            });
        } else {
            results.push(AssignResult {
                employee_id,
                success: false,
                message: Some("Already assigned".to_string()),
            });
        }
    }

    Ok(Json(AssignResponse {
        success: true,
        message: "Assignment operation completed".to_string(),
        results,
    }))
}

/// Remove an employee from a team
///
/// # Errors
///
/// - `400 Bad Request`: Missing employee id
/// - `404 Not Found`: Missing/foreign team or employee, or no such
///   assignment row
pub async fn unassign_employee(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(team_id): Path<i64>,
    Json(req): Json<UnassignRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let Some(employee_id) = req.employee_id else {
        return Err(ApiError::BadRequest("Employee ID is required".to_string()));
    };

    let team = Team::find_by_id(&state.db, team_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    let employee = Employee::find_by_id(&state.db, employee_id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    let unassigned = Team::unassign_employee(&state.db, team_id, employee_id).await?;
    if !unassigned {
        return Err(ApiError::NotFound("Assignment not found".to_string()));
    }

    Log::record(
        &state.db,
        Some(auth.org_id),
        Some(auth.user_id),
        "employee_unassigned_from_team",
        json!({
            "employeeId": employee_id,
            "teamId": team_id,
            "employeeName": format!(
                "{} {}",
                employee.first_name.as_deref().unwrap_or(""),
                employee.last_name.as_deref().unwrap_or("")
            ),
            "teamName": team.name,
        }),
    )
    .await?;

    Ok(Json(MessageResponse::new(
        "Employee unassigned from team successfully",
    )))
}
