//! # JSON Extraction & Validation
//!
//! Provides the [`Validate`] trait for request DTOs and helpers to
//! extract and validate JSON bodies in handlers. Deserialization
//! rejections (malformed JSON, missing required fields) surface under
//! `INVALID_REQUEST`, the same code as business-rule failures, so the
//! caller sees one taxonomy regardless of which layer rejected the body.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::ApiError;

/// Request types that validate business rules beyond what serde checks.
///
/// Validation returns the typed API error directly: different rules map
/// to different error codes (`INVALID_REQUEST` vs `INVALID_CONTENT_URL`),
/// and the first failing rule wins. Implementations check rules in the
/// documented order and never accumulate multiple failures.
pub trait Validate {
    /// Validate business rules. Returns the boundary error on failure.
    fn validate(&self) -> Result<(), ApiError>;
}

/// Extract a JSON body, mapping deserialization errors to `INVALID_REQUEST`.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| ApiError::InvalidRequest(err.body_text()))
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    let value = extract_json(result)?;
    value.validate()?;
    Ok(value)
}
