//! Whole-document ambulance endpoints.
//!
//! These call the document store directly; only condition edits go through
//! the read-modify-write helper.

use ambulance_api::ApiError;
use ambulance_core::{Ambulance, CoreError};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::conditions::parse_body;
use crate::server::AppState;

fn invalid_conditions(err: CoreError) -> ApiError {
    ApiError::bad_request("Invalid request body").with_detail(err)
}

pub async fn create_ambulance(
    State(state): State<AppState>,
    payload: Result<Json<Ambulance>, JsonRejection>,
) -> Result<(StatusCode, Json<Ambulance>), ApiError> {
    let mut ambulance = parse_body(payload)?;
    ambulance
        .ensure_id()
        .map_err(|e| ApiError::bad_request("Invalid ambulance ID").with_detail(e))?;
    ambulance.validate_conditions().map_err(invalid_conditions)?;

    match state.store.create(&ambulance.id, &ambulance).await {
        Ok(stored) => {
            tracing::info!(ambulance_id = %stored.id, "Ambulance created");
            Ok((StatusCode::CREATED, Json(stored.document)))
        }
        Err(err) if err.is_conflict() => {
            Err(ApiError::conflict("Ambulance already exists").with_detail(err))
        }
        Err(err) => {
            tracing::warn!(ambulance_id = %ambulance.id, error = %err, category = %err.category(), "Failed to create ambulance");
            Err(ApiError::bad_gateway("Failed to create ambulance in database").with_detail(err))
        }
    }
}

pub async fn get_ambulance(
    State(state): State<AppState>,
    Path(ambulance_id): Path<String>,
) -> Result<Json<Ambulance>, ApiError> {
    match state.store.find(&ambulance_id).await {
        Ok(stored) => Ok(Json(stored.document)),
        Err(err) if err.is_not_found() => {
            Err(ApiError::not_found("Ambulance not found").with_detail(err))
        }
        Err(err) => {
            tracing::warn!(ambulance_id = %ambulance_id, error = %err, category = %err.category(), "Failed to load ambulance");
            Err(ApiError::bad_gateway("Failed to load ambulance from database").with_detail(err))
        }
    }
}

/// Replaces the stored ambulance wholesale.
///
/// The write carries no revision, so a concurrent condition edit can be
/// overwritten.
pub async fn update_ambulance(
    State(state): State<AppState>,
    Path(ambulance_id): Path<String>,
    payload: Result<Json<Ambulance>, JsonRejection>,
) -> Result<Json<Ambulance>, ApiError> {
    if let Err(err) = state.store.find(&ambulance_id).await {
        if err.is_not_found() {
            return Err(ApiError::not_found("Ambulance not found").with_detail(err));
        }
        tracing::warn!(ambulance_id = %ambulance_id, error = %err, category = %err.category(), "Failed to load ambulance");
        return Err(ApiError::bad_gateway("Failed to load ambulance from database").with_detail(err));
    }

    let mut replacement = parse_body(payload)?;
    replacement
        .bind_to_id(&ambulance_id)
        .map_err(|e| ApiError::bad_request("Ambulance ID does not match the path").with_detail(e))?;
    replacement.validate_conditions().map_err(invalid_conditions)?;

    match state.store.update(&ambulance_id, &replacement, None).await {
        Ok(stored) => {
            tracing::info!(ambulance_id = %ambulance_id, version = %stored.version_id, "Ambulance replaced");
            Ok(Json(stored.document))
        }
        Err(err) => {
            tracing::warn!(ambulance_id = %ambulance_id, error = %err, category = %err.category(), "Failed to update ambulance");
            Err(ApiError::bad_gateway("Failed to update ambulance in database").with_detail(err))
        }
    }
}

pub async fn delete_ambulance(
    State(state): State<AppState>,
    Path(ambulance_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.store.delete(&ambulance_id).await {
        Ok(()) => {
            tracing::info!(ambulance_id = %ambulance_id, "Ambulance deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) if err.is_not_found() => {
            Err(ApiError::not_found("Ambulance not found").with_detail(err))
        }
        Err(err) => {
            tracing::warn!(ambulance_id = %ambulance_id, error = %err, category = %err.category(), "Failed to delete ambulance");
            Err(ApiError::bad_gateway("Failed to delete ambulance from database").with_detail(err))
        }
    }
}
