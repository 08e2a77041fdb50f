//! Postal format reference (public)

use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::postal_format::{self, PostalFormat};
use crate::interfaces::http::common::{ApiError, ErrorBody};
use crate::shared::DomainError;

/// How addresses are written in one country
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostalFormatDto {
    pub country_code: String,
    pub country: String,
    pub format: String,
    pub example: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&PostalFormat> for PostalFormatDto {
    fn from(f: &PostalFormat) -> Self {
        Self {
            country_code: f.country_code.to_string(),
            country: f.country.to_string(),
            format: f.format.to_string(),
            example: f.example.to_string(),
            notes: f.notes.map(String::from),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostalFormatsResponse {
    pub formats: Vec<PostalFormatDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostalFormatResponse {
    pub format: PostalFormatDto,
}

#[utoipa::path(
    get,
    path = "/api/postal-formats",
    tag = "Postal Formats",
    responses(
        (status = 200, description = "All known formats", body = PostalFormatsResponse)
    )
)]
pub async fn list_postal_formats() -> Json<PostalFormatsResponse> {
    Json(PostalFormatsResponse {
        formats: postal_format::all().iter().map(PostalFormatDto::from).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/api/postal-formats/{country_code}",
    tag = "Postal Formats",
    params(("country_code" = String, Path, description = "ISO 3166-1 alpha-2 code, any case")),
    responses(
        (status = 200, description = "Format for the country", body = PostalFormatResponse),
        (status = 404, description = "Unknown country", body = ErrorBody)
    )
)]
pub async fn get_postal_format(
    Path(country_code): Path<String>,
) -> Result<Json<PostalFormatResponse>, ApiError> {
    let format = postal_format::lookup(&country_code).ok_or_else(|| {
        DomainError::NotFound(format!(
            "No postal format for country '{}'",
            country_code.trim().to_uppercase()
        ))
    })?;
    Ok(Json(PostalFormatResponse {
        format: format.into(),
    }))
}
