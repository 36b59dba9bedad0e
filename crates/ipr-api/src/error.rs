//! # API Error Translation
//!
//! Maps tagged errors from the validator, the pinning client, and the
//! registration client to HTTP responses. Every failure renders the
//! uniform envelope:
//!
//! ```json
//! {"status":"error","errorCode":"…","errorMessage":"…","details":"…"}
//! ```
//!
//! Status mapping: 400 for input and validation failures, 404 for
//! lookups of assets that do not exist (and unknown routes), 500 for
//! every upstream or infrastructure failure. Codes the translator does
//! not recognize default to 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ipr_core::CanonicalizationError;
use ipr_pinata::PinataError;
use ipr_story::StoryError;

/// Uniform JSON error envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Always `"error"`.
    pub status: String,
    /// Stable machine-readable code.
    pub error_code: String,
    /// Human-readable message.
    pub error_message: String,
    /// Message of the underlying cause, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application-level error type implementing [`IntoResponse`].
///
/// Client-input failures are constructed here; upstream failures arrive
/// already tagged by their origin crate and pass through unchanged.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request shape or business-rule validation failed (400).
    #[error("{0}")]
    InvalidRequest(String),

    /// The file URL failed URL-syntax parsing (400).
    #[error("{0}")]
    InvalidContentUrl(String),

    /// An address failed format validation outside request validation (400).
    #[error("{0}")]
    InvalidAddress(String),

    /// No route matched the request (404).
    #[error("route not found: {0}")]
    RouteNotFound(String),

    /// Pinning failure, tagged at origin.
    #[error(transparent)]
    Pinata(#[from] PinataError),

    /// Registration gateway failure, tagged at origin.
    #[error(transparent)]
    Story(#[from] StoryError),

    /// A failure inside the registration pipeline that carries no more
    /// specific tag.
    #[error("ip registration failed: {0}")]
    Registration(String),

    /// Catch-all (500).
    #[error("unexpected error: {0}")]
    Unknown(String),
}

/// Canonicalization failures have no dedicated taxonomy code; they wrap
/// under the generic registration failure, preserving the message.
impl From<CanonicalizationError> for ApiError {
    fn from(err: CanonicalizationError) -> Self {
        Self::Registration(err.to_string())
    }
}

impl ApiError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            Self::InvalidContentUrl(_) => (StatusCode::BAD_REQUEST, "INVALID_CONTENT_URL"),
            Self::InvalidAddress(_) => (StatusCode::BAD_REQUEST, "INVALID_ETHEREUM_ADDRESS"),
            Self::RouteNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Pinata(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.code()),
            Self::Story(e) => match e {
                StoryError::AssetNotFound { .. } => (StatusCode::NOT_FOUND, e.code()),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.code()),
            },
            Self::Registration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IP_REGISTRATION_FAILED"),
            Self::Unknown(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UNKNOWN_ERROR"),
        }
    }

    /// Message of the first underlying cause, if any.
    fn details(&self) -> Option<String> {
        std::error::Error::source(self).map(|cause| cause.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error_code = code, error = %self, "request failed");
        } else {
            tracing::warn!(error_code = code, error = %self, "request rejected");
        }

        let body = ErrorBody {
            status: "error".to_string(),
            error_code: code.to_string(),
            error_message: self.to_string(),
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}
