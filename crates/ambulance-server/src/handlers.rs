use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::json;

use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    let body = json!({
        "service": "Ambulance Waiting List API",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "baseUrl": &*state.base_url,
        "storage": state.store.backend_name(),
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

pub async fn readyz() -> impl IntoResponse {
    // The in-memory store has no connection to probe
    (StatusCode::OK, Json(HealthResponse { status: "ready" }))
}
