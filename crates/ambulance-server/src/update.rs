//! Read-modify-write helper shared by every sub-resource mutation.
//!
//! [`update_aggregate`] fetches one aggregate from the document store, hands
//! an owned copy to a caller-supplied transform and, when the transform asks
//! for it, writes the result back guarded by the revision that was read. A
//! concurrent writer that got there first surfaces as `409 Conflict`; nothing
//! is retried.

use ambulance_api::ApiError;
use ambulance_core::Ambulance;
use ambulance_storage::{DocumentStore, StorageError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// A document type addressed by the update helper.
pub trait Aggregate: Send + Sync + 'static {
    /// Display name used in error messages, e.g. "Ambulance".
    const NAME: &'static str;
}

impl Aggregate for Ambulance {
    const NAME: &'static str = "Ambulance";
}

/// Outcome of a successful transform.
///
/// `updated` is written back when present. `body` is serialized as JSON with
/// `status`; without a body only the status is sent.
#[derive(Debug)]
pub struct Transformed<A, R> {
    pub updated: Option<A>,
    pub body: Option<R>,
    pub status: StatusCode,
}

impl<A, R> Transformed<A, R> {
    /// Persist `updated` and respond with `body`.
    pub fn write(updated: A, body: R, status: StatusCode) -> Self {
        Self {
            updated: Some(updated),
            body: Some(body),
            status,
        }
    }

    /// Persist `updated` and respond with a bare status.
    pub fn write_empty(updated: A, status: StatusCode) -> Self {
        Self {
            updated: Some(updated),
            body: None,
            status,
        }
    }

    /// Respond without touching the store.
    pub fn respond(body: R, status: StatusCode) -> Self {
        Self {
            updated: None,
            body: Some(body),
            status,
        }
    }
}

impl<A, R: Serialize> Transformed<A, R> {
    fn into_response_parts(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Runs `transform` against the stored aggregate `id`.
///
/// A missing aggregate answers `404` before the transform runs; any other
/// read failure answers `502`. An `Err` from the transform is returned as-is
/// and nothing is written. At most one write happens per call.
pub async fn update_aggregate<S, A, R, F>(
    store: &S,
    id: &str,
    transform: F,
) -> Result<Response, ApiError>
where
    S: DocumentStore<A> + ?Sized,
    A: Aggregate,
    R: Serialize,
    F: FnOnce(A) -> Result<Transformed<A, R>, ApiError>,
{
    let stored = store.find(id).await.map_err(|err| load_error::<A>(id, err))?;
    let revision = stored.version_id;

    let outcome = transform(stored.document)?;

    if let Some(updated) = outcome.updated.as_ref() {
        match store.update(id, updated, Some(&revision)).await {
            Ok(saved) => {
                tracing::debug!(
                    aggregate = A::NAME,
                    id = %id,
                    from = %revision,
                    to = %saved.version_id,
                    "Aggregate updated"
                );
            }
            Err(err) => return Err(save_error::<A>(id, err)),
        }
    }

    Ok(outcome.into_response_parts())
}

fn load_error<A: Aggregate>(id: &str, err: StorageError) -> ApiError {
    if err.is_not_found() {
        tracing::debug!(aggregate = A::NAME, id = %id, "Aggregate not found");
        return ApiError::not_found(format!("{} not found", A::NAME)).with_detail(err);
    }
    tracing::warn!(aggregate = A::NAME, id = %id, error = %err, category = %err.category(), "Failed to load aggregate");
    ApiError::bad_gateway(format!(
        "Failed to load {} from database",
        A::NAME.to_ascii_lowercase()
    ))
    .with_detail(err)
}

fn save_error<A: Aggregate>(id: &str, err: StorageError) -> ApiError {
    tracing::warn!(aggregate = A::NAME, id = %id, error = %err, category = %err.category(), "Failed to save aggregate");
    if err.is_conflict() {
        ApiError::conflict(format!(
            "{} was modified concurrently, reload and retry",
            A::NAME
        ))
        .with_detail(err)
    } else if err.is_not_found() {
        ApiError::not_found(format!("{} not found", A::NAME)).with_detail(err)
    } else {
        ApiError::bad_gateway(format!(
            "Failed to update {} in database",
            A::NAME.to_ascii_lowercase()
        ))
        .with_detail(err)
    }
}
