//! Error body and status mapping shared by every HTTP feature.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ErrorCode, ValidationError};

/// Standard error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code, e.g. `INSUFFICIENT_STOCK`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// HTTP status for an error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::InsufficientStock
        | ErrorCode::AlreadyReturned
        | ErrorCode::AmbiguousSelection
        | ErrorCode::PartialReturnUnsupported => StatusCode::BAD_REQUEST,
        ErrorCode::ItemNotFound | ErrorCode::BorrowNotFound | ErrorCode::NotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds an error response from a code and message.
pub fn error_response(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(code.to_string(), message))).into_response()
}

/// Unwraps a JSON body, turning extractor rejections into validation errors.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ValidationError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ValidationError::rule(format!("invalid json: {}", e.body_text())))
}

/// Unwraps a numeric path parameter, rejecting malformed values as validation errors.
pub fn path_id(path: Result<Path<i64>, PathRejection>, field: &str) -> Result<i64, ValidationError> {
    path.map(|Path(id)| id)
        .map_err(|_| ValidationError::invalid_format(field, "expected a positive integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lending_conflicts_are_client_errors() {
        assert_eq!(status_for(ErrorCode::InsufficientStock), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::AlreadyReturned), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::BorrowNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::Conflict), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_uses_code_and_message() {
        let body = ErrorResponse::new("ITEM_NOT_FOUND", "item not found: 4");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "ITEM_NOT_FOUND");
        assert_eq!(json["message"], "item not found: 4");
    }
}
