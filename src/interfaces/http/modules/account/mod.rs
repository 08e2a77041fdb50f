//! Account deletion

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::AccountService;
use crate::auth::Principal;
use crate::interfaces::http::common::{ApiError, ErrorBody};

#[derive(Clone)]
pub struct AccountState {
    pub accounts: Arc<AccountService>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/api/user/delete",
    tag = "Account",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status = 200, description = "Account and all owned data removed", body = DeleteAccountResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn delete_account(
    State(state): State<AccountState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<DeleteAccountResponse>, ApiError> {
    state
        .accounts
        .delete_account(&principal.user_id)
        .await
        .map_err(ApiError::with("Failed to delete account"))?;
    Ok(Json(DeleteAccountResponse {
        success: true,
        message: "Account deleted successfully".to_string(),
    }))
}
