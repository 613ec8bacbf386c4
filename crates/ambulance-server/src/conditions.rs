//! Predefined condition endpoints.
//!
//! Each handler runs through [`update_aggregate`]: the ambulance is loaded,
//! one of the transforms below edits its condition list, and the helper writes
//! the ambulance back when the transform changed it.

use ambulance_api::ApiError;
use ambulance_core::{Ambulance, Condition, ConditionError};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};

use crate::server::AppState;
use crate::update::{Transformed, update_aggregate};

type ConditionOutcome<R> = Result<Transformed<Ambulance, R>, ApiError>;

/// Maps a rejected condition operation onto its HTTP error.
pub fn condition_error(err: ConditionError) -> ApiError {
    match err {
        ConditionError::MissingAmbulanceId => ApiError::bad_request("Ambulance ID is required"),
        ConditionError::MissingCode => ApiError::bad_request("Condition code is required"),
        ConditionError::AlreadyExists(_) => {
            ApiError::conflict("Entry already exists").with_detail(err)
        }
        ConditionError::NotFound(_) => ApiError::not_found("Entry not found").with_detail(err),
        ConditionError::CodeTaken(_) => ApiError::bad_request(
            "You cannot change the code of the condition, because a condition with that code already exists",
        )
        .with_detail(err),
        ConditionError::NotPersisted(_) => {
            ApiError::internal("Failed to save entry").with_detail(err)
        }
    }
}

/// Turns a JSON extractor rejection into the "Invalid request body" error.
pub fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        ApiError::bad_request("Invalid request body").with_detail(rejection.body_text())
    })
}

pub fn list(ambulance: Ambulance) -> ConditionOutcome<Vec<Condition>> {
    Ok(Transformed::respond(
        ambulance.predefined_conditions,
        StatusCode::OK,
    ))
}

pub fn add(
    mut ambulance: Ambulance,
    body: Result<Condition, ApiError>,
) -> ConditionOutcome<Condition> {
    let condition = body?;
    let stored = ambulance
        .add_condition(condition)
        .map_err(condition_error)?
        .clone();
    Ok(Transformed::write(ambulance, stored, StatusCode::OK))
}

pub fn update(
    mut ambulance: Ambulance,
    code: &str,
    body: Result<Condition, ApiError>,
) -> ConditionOutcome<Condition> {
    let patch = body?;
    let stored = ambulance
        .update_condition(code, patch)
        .map_err(condition_error)?
        .clone();
    Ok(Transformed::write(ambulance, stored, StatusCode::OK))
}

pub fn remove(mut ambulance: Ambulance, code: &str) -> ConditionOutcome<Condition> {
    ambulance.remove_condition(code).map_err(condition_error)?;
    Ok(Transformed::write_empty(ambulance, StatusCode::NO_CONTENT))
}

// ---- HTTP handlers ----

pub async fn list_conditions(
    State(state): State<AppState>,
    Path(ambulance_id): Path<String>,
) -> Result<Response, ApiError> {
    update_aggregate(&*state.store, &ambulance_id, list).await
}

pub async fn create_condition(
    State(state): State<AppState>,
    Path(ambulance_id): Path<String>,
    payload: Result<Json<Condition>, JsonRejection>,
) -> Result<Response, ApiError> {
    let body = parse_body(payload);
    update_aggregate(&*state.store, &ambulance_id, move |ambulance| {
        add(ambulance, body)
    })
    .await
}

pub async fn update_condition(
    State(state): State<AppState>,
    Path((ambulance_id, condition_id)): Path<(String, String)>,
    payload: Result<Json<Condition>, JsonRejection>,
) -> Result<Response, ApiError> {
    let body = parse_body(payload);
    update_aggregate(&*state.store, &ambulance_id, move |ambulance| {
        update(ambulance, &condition_id, body)
    })
    .await
}

pub async fn delete_condition(
    State(state): State<AppState>,
    Path((ambulance_id, condition_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    update_aggregate(&*state.store, &ambulance_id, move |ambulance| {
        remove(ambulance, &condition_id)
    })
    .await
}
