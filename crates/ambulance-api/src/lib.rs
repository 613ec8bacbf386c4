use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body of every error response.
///
/// `error` carries the underlying failure text (parse error, storage error)
/// and is omitted when there is none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// High-level API errors to be mapped to HTTP responses.
///
/// The set is closed: every failure a handler can produce is one of these
/// variants, each with a fixed status code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        detail: Option<String>,
    },
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        detail: Option<String>,
    },
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        detail: Option<String>,
    },
    #[error("Bad gateway: {message}")]
    BadGateway {
        message: String,
        detail: Option<String>,
    },
    #[error("Internal server error: {message}")]
    Internal {
        message: String,
        detail: Option<String>,
    },
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest {
            message: msg.into(),
            detail: None,
        }
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound {
            message: msg.into(),
            detail: None,
        }
    }
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict {
            message: msg.into(),
            detail: None,
        }
    }
    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self::BadGateway {
            message: msg.into(),
            detail: None,
        }
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal {
            message: msg.into(),
            detail: None,
        }
    }

    /// Attaches the underlying failure text, rendered as `error` in the body.
    pub fn with_detail(mut self, text: impl ToString) -> Self {
        let slot = match &mut self {
            ApiError::BadRequest { detail, .. }
            | ApiError::NotFound { detail, .. }
            | ApiError::Conflict { detail, .. }
            | ApiError::BadGateway { detail, .. }
            | ApiError::Internal { detail, .. } => detail,
        };
        *slot = Some(text.to_string());
        self
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Conflict { message, .. }
            | ApiError::BadGateway { message, .. }
            | ApiError::Internal { message, .. } => message,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest { detail, .. }
            | ApiError::NotFound { detail, .. }
            | ApiError::Conflict { detail, .. }
            | ApiError::BadGateway { detail, .. }
            | ApiError::Internal { detail, .. } => detail.as_deref(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            status: self.status_code().as_u16(),
            message: self.message().to_string(),
            error: self.detail().map(str::to_string),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, detail = ?self.detail(), "request failed");
        }

        let body = serde_json::to_vec(&self.to_error_response()).unwrap_or_else(|_| {
            // Fallback minimal body if serialization fails
            format!(r#"{{"status":{}}}"#, status.as_u16()).into_bytes()
        });

        let builder = axum::http::Response::builder()
            .status(status)
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );

        match builder.body(axum::body::Body::from(body)) {
            Ok(response) => response,
            Err(_) => (status, axum::body::Body::empty()).into_response(),
        }
    }
}
