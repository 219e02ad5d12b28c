//! Panic recovery
//!
//! Turns a panicking handler into a 500 JSON response instead of a dropped
//! connection. The panic message is only exposed in development mode.

use axum::Json;
use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use log::error;
use std::any::Any;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::api::responses::ApiResponse;
use crate::config::DeploymentMode;

/// Detail shown instead of the panic message outside development mode.
const GENERIC_DETAIL: &str = "Internal error";

#[derive(Debug, Clone, Copy)]
pub struct PanicResponder {
    environment: DeploymentMode,
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(
        &mut self,
        err: Box<dyn Any + Send + 'static>,
    ) -> Response<Self::ResponseBody> {
        let detail = panic_message(&*err);
        error!("Unhandled error: {}", detail);

        let shown = if self.environment.is_development() {
            detail
        } else {
            GENERIC_DETAIL.to_string()
        };

        let body = ApiResponse::failure("Unexpected server error").with_error(shown);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic".to_string()
    }
}

pub fn catch_panic_layer(environment: DeploymentMode) -> CatchPanicLayer<PanicResponder> {
    CatchPanicLayer::custom(PanicResponder { environment })
}
