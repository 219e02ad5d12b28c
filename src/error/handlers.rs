//! Error handlers
//!
//! Converts domain errors into HTTP statuses and JSON bodies at the handler
//! boundary.

use axum::Json;
use axum::http::StatusCode;
use log::{error, warn};

use crate::api::responses::ApiResponse;
use crate::error::types::{AuthError, StoreError};

/// The endpoint an error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
}

impl Operation {
    fn server_error_message(self) -> &'static str {
        match self {
            Operation::Register => "Server error during registration",
            Operation::Login => "Server error during login",
        }
    }
}

/// Log an error with a severity matching its status class
pub fn handle_error(err: &AuthError, operation: Operation) {
    if error_to_status(err).is_server_error() {
        error!("{:?} failed: {}", operation, err);
    } else {
        warn!("{:?} rejected: {}", operation, err);
    }
}

/// Convert error to HTTP status code
pub fn error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::MissingFields(_) => StatusCode::BAD_REQUEST,
        AuthError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        AuthError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        AuthError::Validation(_) => StatusCode::BAD_REQUEST,
        AuthError::Conflict(_) => StatusCode::BAD_REQUEST,
        AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
        AuthError::Forbidden => StatusCode::FORBIDDEN,
        AuthError::Store(StoreError::DuplicateKey(_)) => StatusCode::BAD_REQUEST,
        AuthError::Store(StoreError::ConstraintViolation(_)) => StatusCode::BAD_REQUEST,
        AuthError::Store(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the JSON failure response for an error raised by `operation`
pub fn error_response(err: AuthError, operation: Operation) -> (StatusCode, Json<ApiResponse>) {
    handle_error(&err, operation);
    let status = error_to_status(&err);

    let body = match err {
        AuthError::MissingFields(message) | AuthError::Conflict(message) => {
            ApiResponse::failure(message)
        }
        AuthError::InvalidBody(detail) => {
            ApiResponse::failure("Invalid request body").with_error(detail)
        }
        AuthError::PayloadTooLarge(detail) => {
            ApiResponse::failure("Request body too large").with_error(detail)
        }
        AuthError::Validation(errors) => {
            ApiResponse::failure("Validation failed").with_field_errors(errors)
        }
        AuthError::Unauthorized => ApiResponse::failure("Invalid credentials"),
        AuthError::Forbidden => ApiResponse::failure("Login denied: Unrecognized device"),
        AuthError::Store(StoreError::ConstraintViolation(detail)) => {
            ApiResponse::failure("Validation failed").with_error(detail)
        }
        AuthError::Store(StoreError::DuplicateKey(field)) => {
            ApiResponse::failure("Duplicate account").with_error(format!("{field} already exists"))
        }
        AuthError::Store(other) => {
            ApiResponse::failure(operation.server_error_message()).with_error(other.to_string())
        }
    };

    (status, Json(body))
}
