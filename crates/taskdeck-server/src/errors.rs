//! HTTP error responses.
//!
//! Every failure is rendered as `{"message": "..."}`. Input problems map to
//! 400 and storage problems to 500.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, error};

use taskdeck_store::StoreError;

/// Errors returned by route handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body or its values were rejected.
    #[error("{message}")]
    BadRequest {
        /// Human-readable reason.
        message: String,
    },

    /// The request body exceeded the configured limit.
    #[error("{message}")]
    PayloadTooLarge {
        /// Human-readable reason.
        message: String,
    },

    /// Storage or runtime failure.
    #[error("{message}")]
    Internal {
        /// Human-readable reason.
        message: String,
    },
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        if err.is_validation() {
            Self::BadRequest { message }
        } else {
            Self::Internal { message }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge { message }
        } else {
            Self::BadRequest { message }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            error!(status = status.as_u16(), %message, "request failed");
        } else {
            debug!(status = status.as_u16(), %message, "request rejected");
        }
        (status, Json(ErrorBody { message: &message })).into_response()
    }
}
