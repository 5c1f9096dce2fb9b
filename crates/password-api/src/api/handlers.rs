//! HTTP request handlers.

use super::types::{
    CreatePasswordRequest, HealthResponse, MessageResponse, PasswordEntry, SearchQuery,
};
use super::AppState;
use crate::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use credential_store::StoreError;
use tracing::{debug, warn};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        storage_healthy: state.service.health_check().await,
    })
}

/// Store a password.
pub async fn create_password(
    State(state): State<AppState>,
    payload: Result<Json<CreatePasswordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| {
        debug!("Rejected request body: {}", e);
        ApiError::Validation("Invalid input".into())
    })?;

    state
        .service
        .create(request.into())
        .await
        .map_err(|e| match e {
            StoreError::Invalid(_) => ApiError::Validation("Invalid input".into()),
            _ => ApiError::Storage("Failed to create password".into()),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Password created successfully".to_string(),
        }),
    ))
}

/// All passwords stored for a phone number.
///
/// An empty result is reported as a failure, like any other store error.
pub async fn list_passwords(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<Vec<PasswordEntry>>, ApiError> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(ApiError::Validation("Phone number is required".into()));
    }

    let found = state.service.list_by_phone(phone).await.map_err(|e| {
        warn!("List by phone failed: {}", e);
        ApiError::Storage("Failed to fetch passwords".into())
    })?;

    Ok(Json(found.into_iter().map(PasswordEntry::from).collect()))
}

/// Passwords for a phone number whose site contains the given text.
///
/// Query strings are form-decoded, so a literal `+` arrives as a space and is
/// trimmed away. Callers must send the leading plus as `%2B`.
pub async fn search_passwords(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<PasswordEntry>>, ApiError> {
    let phone = query.phone.as_deref().map(str::trim).unwrap_or_default();
    let site = query.site.as_deref().map(str::trim).unwrap_or_default();

    if phone.is_empty() || site.is_empty() {
        return Err(ApiError::Validation("Phone and site are required".into()));
    }

    let found = state
        .service
        .search_by_phone_and_site(phone, site)
        .await
        .map_err(|e| match e {
            e if e.is_not_found() => ApiError::NotFound(e.to_string()),
            e => {
                warn!("Search by site failed: {}", e);
                ApiError::Storage("Failed to fetch passwords".into())
            }
        })?;

    Ok(Json(found.into_iter().map(PasswordEntry::from).collect()))
}
