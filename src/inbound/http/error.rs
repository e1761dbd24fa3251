//! HTTP adapter mapping for directory errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn directory failures into consistent JSON responses and
//! status codes.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DirectoryError;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DirectoryError>;

/// Field-level violation as rendered to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViolationBody {
    /// Field the violation applies to.
    #[schema(example = "userName")]
    pub field: String,
    /// Human-readable description of the violation.
    #[schema(example = "user name is already taken")]
    pub message: String,
}

/// Standard error envelope returned by the HTTP adapter.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    pub code: &'static str,
    /// Human-readable message.
    #[schema(example = "account validation failed")]
    pub message: String,
    /// Violations carried by validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<ViolationBody>>,
}

fn status_for(error: &DirectoryError) -> StatusCode {
    match error {
        DirectoryError::Validation { .. } => StatusCode::BAD_REQUEST,
        DirectoryError::NotFound => StatusCode::NOT_FOUND,
        DirectoryError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DirectoryError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn code_for(error: &DirectoryError) -> &'static str {
    match error {
        DirectoryError::Validation { .. } => "invalid_request",
        DirectoryError::NotFound => "not_found",
        DirectoryError::StoreUnavailable { .. } => "service_unavailable",
        DirectoryError::Internal { .. } => "internal_error",
    }
}

fn body_for(err: &DirectoryError) -> ErrorBody {
    // Do not leak implementation details to clients.
    let message = match err {
        DirectoryError::Internal { message } => {
            error!(message = %message, "internal directory error");
            "Internal server error".to_owned()
        }
        other => other.to_string(),
    };

    let violations = match err {
        DirectoryError::Validation { violations } => Some(
            violations
                .iter()
                .map(|violation| ViolationBody {
                    field: violation.field.to_owned(),
                    message: violation.message.clone(),
                })
                .collect(),
        ),
        _ => None,
    };

    ErrorBody {
        code: code_for(err),
        message,
        violations,
    }
}

impl ResponseError for DirectoryError {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(body_for(self))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::FieldViolation;
    use rstest::rstest;

    #[rstest]
    fn status_codes_match_error_variants() {
        let cases = [
            (
                DirectoryError::single_violation("userName", "bad"),
                StatusCode::BAD_REQUEST,
            ),
            (DirectoryError::NotFound, StatusCode::NOT_FOUND),
            (
                DirectoryError::store_unavailable("down"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DirectoryError::internal("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
        }
    }

    #[rstest]
    fn validation_body_lists_violations() {
        let err = DirectoryError::validation(vec![
            FieldViolation::new("userName", "too short"),
            FieldViolation::new("password", "missing digit"),
        ]);

        let body = body_for(&err);
        assert_eq!(body.code, "invalid_request");
        let violations = body.violations.expect("violations present");
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "userName");
    }

    #[rstest]
    fn internal_messages_are_redacted() {
        let err = DirectoryError::internal("connection string leaked");

        let body = body_for(&err);
        assert_eq!(body.code, "internal_error");
        assert_eq!(body.message, "Internal server error");
        assert!(body.violations.is_none());
    }
}
