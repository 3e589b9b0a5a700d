/// Employee endpoints
///
/// # Endpoints
///
/// - `GET /api/employees` - List employees with their team memberships
/// - `GET /api/employees/:id` - Get one employee
/// - `POST /api/employees` - Create employee
/// - `PUT /api/employees/:id` - Partial update
/// - `DELETE /api/employees/:id` - Delete (cascades team assignments)
///
/// All endpoints are tenant-scoped through the auth context; an id belonging
/// to another organisation is a 404, never a 403.
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
        employee::{CreateEmployee, Employee, UpdateEmployee},
        log::Log,
        team::Team,
    },
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{DataResponse, MessageResponse};

/// Create employee request
///
/// First and last name are required; the presence check happens here rather
/// than in the deserializer so the failure is the contract's 400.
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    /// First name
    pub first_name: Option<String>,

    /// Last name
    pub last_name: Option<String>,

    /// Contact email (optional: employees are records, not login principals)
    pub email: Option<String>,

    /// Contact phone
    pub phone: Option<String>,
}

/// Partial update request; omitted fields keep their stored value
#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    /// New first name
    pub first_name: Option<String>,

    /// New last name
    pub last_name: Option<String>,

    /// New contact email (empty string clears)
    pub email: Option<String>,

    /// New contact phone (empty string clears)
    pub phone: Option<String>,
}

/// Employee annotated with its current team memberships
#[derive(Debug, Serialize)]
pub struct EmployeeWithTeams {
    /// The employee record
    #[serde(flatten)]
    pub employee: Employee,

    /// Teams the employee is assigned to
    pub teams: Vec<Team>,
}

/// List all employees of the caller's organisation
///
/// Each employee is annotated with its current team memberships.
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<DataResponse<Vec<EmployeeWithTeams>>>> {
    let employees = Employee::list(&state.db, auth.org_id).await?;

    let mut data = Vec::with_capacity(employees.len());
    for employee in employees {
        let teams = Employee::teams(&state.db, employee.id, auth.org_id).await?;
        data.push(EmployeeWithTeams { employee, teams });
    }

    Ok(Json(DataResponse::new(data)))
}

/// Get one employee
///
/// # Errors
///
/// - `404 Not Found`: Missing or foreign employee id
pub async fn get_employee(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DataResponse<EmployeeWithTeams>>> {
    let employee = Employee::find_by_id(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    let teams = Employee::teams(&state.db, id, auth.org_id).await?;

    Ok(Json(DataResponse::new(EmployeeWithTeams { employee, teams })))
}

/// Create an employee
///
/// # Errors
///
/// - `400 Bad Request`: Missing first or last name
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<DataResponse<Employee>>)> {
    let (Some(first_name), Some(last_name)) = (req.first_name, req.last_name) else {
        return Err(ApiError::BadRequest(
            "First name and last name are required".to_string(),
        ));
    };

    let employee = Employee::create(
        &state.db,
        auth.org_id,
        CreateEmployee {
            first_name: first_name.clone(),
            last_name: last_name.clone(),
            email: req.email,
            phone: req.phone,
        },
    )
    .await?;

    Log::record(
        &state.db,
        Some(auth.org_id),
        Some(auth.user_id),
        "employee_created",
        json!({
            "employeeId": employee.id,
            "firstName": first_name,
            "lastName": last_name,
        }),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            "Employee created successfully",
            employee,
        )),
    ))
}

/// Partially update an employee
///
/// Omitted fields keep their stored value; an explicit empty string clears
/// the field. The audit entry records the submitted diff only.
///
/// # Errors
///
/// - `404 Not Found`: Missing or foreign employee id
pub async fn update_employee(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> ApiResult<Json<DataResponse<Employee>>> {
    let changes = json!({
        "first_name": req.first_name,
        "last_name": req.last_name,
        "email": req.email,
        "phone": req.phone,
    });

    let update = UpdateEmployee {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        phone: req.phone,
    };

    let employee = Employee::update(&state.db, id, auth.org_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    Log::record(
        &state.db,
        Some(auth.org_id),
        Some(auth.user_id),
        "employee_updated",
        json!({
            "employeeId": id,
            "changes": changes,
        }),
    )
    .await?;

    Ok(Json(DataResponse::with_message(
        "Employee updated successfully",
        employee,
    )))
}

/// Delete an employee
///
/// Team assignment rows go with it via the join table's cascade.
///
/// # Errors
///
/// - `404 Not Found`: Missing or foreign employee id
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let employee = Employee::find_by_id(&state.db, id, auth.org_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    let deleted = Employee::delete(&state.db, id, auth.org_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Employee not found".to_string()));
    }

    Log::record(
        &state.db,
        Some(auth.org_id),
        Some(auth.user_id),
        "employee_deleted",
        json!({
            "employeeId": id,
            "firstName": employee.first_name,
            "lastName": employee.last_name,
        }),
    )
    .await?;

    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}
