//! Endpoint handlers
//!
//! Each handler extracts the body, runs the matching auth operation against
//! the injected store, and converts the outcome to a status + JSON body.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use log::info;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::AppState;
use crate::api::responses::ApiResponse;
use crate::auth::{LoginRequest, RegisterRequest, process_login, process_register};
use crate::error::AuthError;
use crate::error::handlers::{Operation, error_response};

pub type JsonResult = (StatusCode, Json<ApiResponse>);

/// POST /register
pub async fn handle_register(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> JsonResult {
    let request = match read_body::<RegisterRequest>(body) {
        Ok(request) => request,
        Err(e) => return error_response(e, Operation::Register),
    };

    match process_register(&*state.store, request) {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok("User registered successfully", user)),
        ),
        Err(e) => error_response(e, Operation::Register),
    }
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> JsonResult {
    let request = match read_body::<LoginRequest>(body) {
        Ok(request) => request,
        Err(e) => return error_response(e, Operation::Login),
    };

    match process_login(&*state.store, request) {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::ok("Login successful", user)),
        ),
        Err(e) => error_response(e, Operation::Login),
    }
}

/// GET /ping
pub async fn handle_ping() -> &'static str {
    info!("Ping received");
    "pong"
}

/// Unwraps a JSON body into a request. Fields are only read from a JSON
/// object; any other JSON value, or a request without a JSON content type,
/// is read as an empty object so it falls through to the missing-fields check.
fn read_body<T>(body: Result<Json<Value>, JsonRejection>) -> Result<T, AuthError>
where
    T: DeserializeOwned + Default,
{
    match body {
        Ok(Json(object @ Value::Object(_))) => {
            serde_json::from_value(object).map_err(|e| AuthError::InvalidBody(e.to_string()))
        }
        Ok(Json(_)) => Ok(T::default()),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(AuthError::PayloadTooLarge(rejection.body_text()))
        }
        Err(rejection) => Err(AuthError::InvalidBody(rejection.body_text())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentMode;
    use crate::storage::{AccountStore, SqliteAccountStore};
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new(
            Arc::new(SqliteAccountStore::open_in_memory().unwrap()),
            DeploymentMode::Production,
        )
    }

    fn alice() -> Value {
        serde_json::json!({
            "username": "alice",
            "email": "a@x.com",
            "password": "secret1",
            "deviceId": "dev-A"
        })
    }

    #[tokio::test]
    async fn register_answers_created_with_user() {
        let (status, Json(body)) = handle_register(State(state()), Ok(Json(alice()))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.success);
        assert_eq!(body.message, "User registered successfully");
        assert_eq!(body.user.unwrap().email, "a@x.com");
    }

    #[tokio::test]
    async fn login_on_foreign_device_answers_forbidden() {
        let state = state();
        handle_register(State(state.clone()), Ok(Json(alice()))).await;

        let (status, Json(body)) = handle_login(
            State(state),
            Ok(Json(serde_json::json!({
                "email": "a@x.com",
                "password": "secret1",
                "deviceId": "dev-B"
            }))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(!body.success);
        assert_eq!(body.message, "Login denied: Unrecognized device");
    }

    #[tokio::test]
    async fn positional_array_body_is_treated_as_empty() {
        let state = state();
        let (status, Json(body)) = handle_register(
            State(state.clone()),
            Ok(Json(serde_json::json!(["alice", "a@x.com", "secret1", "dev-A"]))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "All fields including deviceId are required");
        assert!(state.store.find_by_email("a@x.com").unwrap().is_none());
    }

    #[test]
    fn scalar_body_reads_as_empty_request() {
        let request: LoginRequest = read_body(Ok(Json(Value::from("a@x.com")))).unwrap();
        assert!(request.email.is_none());
    }

    #[tokio::test]
    async fn ping_answers_pong() {
        assert_eq!(handle_ping().await, "pong");
    }
}
