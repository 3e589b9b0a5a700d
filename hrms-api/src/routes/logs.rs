/// Audit log endpoints
///
/// # Endpoints
///
/// - `GET /api/logs?limit=` - Most recent audit entries, newest first
///
/// The contract is "most recent N" (default 100) for the caller's
/// organisation; there is no offset pagination.
use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use hrms_shared::{auth::middleware::AuthContext, models::log::Log};
use serde::Deserialize;

use super::DataResponse;

/// Default number of entries returned when `limit` is absent
const DEFAULT_LIMIT: i64 = 100;

/// Query parameters for log listing
#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    /// Maximum number of entries to return (default 100)
    pub limit: Option<i64>,
}

/// List the most recent audit entries for the caller's organisation
pub async fn list_logs(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<LogsQuery>,
) -> ApiResult<Json<DataResponse<Vec<Log>>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let logs = Log::list_recent(&state.db, auth.org_id, limit).await?;

    Ok(Json(DataResponse::new(logs)))
}
