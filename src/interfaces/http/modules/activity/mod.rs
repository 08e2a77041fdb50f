//! Activity feed

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::ActivityLogService;
use crate::auth::Principal;
use crate::domain::{ActivityLogEntry, DomainError};
use crate::interfaces::http::common::{ApiError, ErrorBody};

#[derive(Clone)]
pub struct ActivityState {
    pub activity: Arc<ActivityLogService>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ActivityParams {
    /// Number of entries (clamped to the configured page size)
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActivityResponse {
    pub activities: Vec<ActivityLogEntry>,
}

#[utoipa::path(
    get,
    path = "/api/activity",
    tag = "Activity",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    params(ActivityParams),
    responses(
        (status = 200, description = "Newest first", body = ActivityResponse),
        (status = 400, description = "Malformed query string", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn list_activity(
    State(state): State<ActivityState>,
    Extension(principal): Extension<Principal>,
    params: Result<Query<ActivityParams>, QueryRejection>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        ApiError::from(DomainError::Validation(format!(
            "Invalid query: {}",
            rejection.body_text()
        )))
    })?;
    let activities = state
        .activity
        .recent(&principal.user_id, params.limit)
        .await
        .map_err(ApiError::with("Failed to fetch activity log"))?;
    Ok(Json(ActivityResponse { activities }))
}
