//! Address verification and address book handlers
//!
//! Verification is public. Address book routes sit behind `require_session`
//! and read the caller from `Extension<Principal>`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    GeolocationRequest, MessageResponse, SaveAddressRequest, SavedAddressResponse,
    SavedAddressesResponse, UpdateLabelRequest, VerifiedAddressResponse, VerifyAddressRequest,
};
use crate::application::{AddressBookService, AddressVerificationService};
use crate::auth::Principal;
use crate::interfaces::http::common::{ApiError, ErrorBody, ValidatedJson};

#[derive(Clone)]
pub struct VerificationState {
    pub verification: Arc<AddressVerificationService>,
}

#[derive(Clone)]
pub struct AddressBookState {
    pub address_book: Arc<AddressBookService>,
}

#[utoipa::path(
    post,
    path = "/api/addresses/verify",
    tag = "Verification",
    request_body = VerifyAddressRequest,
    responses(
        (status = 200, description = "Canonical address", body = VerifiedAddressResponse),
        (status = 400, description = "Invalid input or provider failure", body = ErrorBody),
        (status = 404, description = "No match", body = ErrorBody),
        (status = 500, description = "Provider not configured", body = ErrorBody)
    )
)]
pub async fn verify_address(
    State(state): State<VerificationState>,
    ValidatedJson(request): ValidatedJson<VerifyAddressRequest>,
) -> Result<Json<VerifiedAddressResponse>, ApiError> {
    let address = state
        .verification
        .verify_by_text(&request.address)
        .await
        .map_err(ApiError::with("Failed to verify address"))?;
    Ok(Json(VerifiedAddressResponse { address }))
}

#[utoipa::path(
    post,
    path = "/api/addresses/geolocation",
    tag = "Verification",
    request_body = GeolocationRequest,
    responses(
        (status = 200, description = "Canonical address", body = VerifiedAddressResponse),
        (status = 400, description = "Invalid coordinates or provider failure", body = ErrorBody),
        (status = 404, description = "No match", body = ErrorBody),
        (status = 500, description = "Provider not configured", body = ErrorBody)
    )
)]
pub async fn reverse_geocode(
    State(state): State<VerificationState>,
    ValidatedJson(request): ValidatedJson<GeolocationRequest>,
) -> Result<Json<VerifiedAddressResponse>, ApiError> {
    let (latitude, longitude) = (
        request.latitude.unwrap_or_default(),
        request.longitude.unwrap_or_default(),
    );
    let address = state
        .verification
        .verify_by_coordinates(latitude, longitude)
        .await
        .map_err(ApiError::with("Failed to get address from coordinates"))?;
    Ok(Json(VerifiedAddressResponse { address }))
}

#[utoipa::path(
    get,
    path = "/api/addresses/saved",
    tag = "Address Book",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    responses(
        (status = 200, description = "Caller's addresses, oldest first", body = SavedAddressesResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn list_saved(
    State(state): State<AddressBookState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<SavedAddressesResponse>, ApiError> {
    let addresses = state
        .address_book
        .list(&principal.user_id)
        .await
        .map_err(ApiError::with("Failed to fetch saved addresses"))?;
    Ok(Json(SavedAddressesResponse { addresses }))
}

#[utoipa::path(
    post,
    path = "/api/addresses/saved",
    tag = "Address Book",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    request_body = SaveAddressRequest,
    responses(
        (status = 201, description = "Address saved", body = SavedAddressResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn save_address(
    State(state): State<AddressBookState>,
    Extension(principal): Extension<Principal>,
    ValidatedJson(request): ValidatedJson<SaveAddressRequest>,
) -> Result<(StatusCode, Json<SavedAddressResponse>), ApiError> {
    let address = state
        .address_book
        .save(&principal.user_id, request.into())
        .await
        .map_err(ApiError::with("Failed to save address"))?;
    Ok((
        StatusCode::CREATED,
        Json(SavedAddressResponse {
            address,
            message: "Address saved successfully".to_string(),
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/addresses/saved/{id}",
    tag = "Address Book",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    params(("id" = String, Path, description = "Saved address ID")),
    request_body = UpdateLabelRequest,
    responses(
        (status = 200, description = "Label updated", body = SavedAddressResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_label(
    State(state): State<AddressBookState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateLabelRequest>,
) -> Result<Json<SavedAddressResponse>, ApiError> {
    let address = state
        .address_book
        .update_label(&principal.user_id, &id, request.label)
        .await
        .map_err(ApiError::with("Failed to update address"))?;
    Ok(Json(SavedAddressResponse {
        address,
        message: "Address updated successfully".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/addresses/saved/{id}",
    tag = "Address Book",
    security(("bearer_auth" = []), ("session_cookie" = [])),
    params(("id" = String, Path, description = "Saved address ID")),
    responses(
        (status = 200, description = "Address deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn delete_address(
    State(state): State<AddressBookState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .address_book
        .delete(&principal.user_id, &id)
        .await
        .map_err(ApiError::with("Failed to delete address"))?;
    Ok(Json(MessageResponse {
        message: "Address deleted successfully".to_string(),
    }))
}
