//! HTTP interface
//!
//! Routes, shared handler state, and JSON response shapes.

pub mod handlers;
pub mod responses;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::DeploymentMode;
use crate::middleware::logging::log_request;
use crate::middleware::panic::catch_panic_layer;
use crate::storage::AccountStore;
use handlers::{handle_login, handle_ping, handle_register};

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AccountStore>,
    pub environment: DeploymentMode,
}

impl AppState {
    pub fn new(store: Arc<dyn AccountStore>, environment: DeploymentMode) -> Self {
        Self { store, environment }
    }
}

/// Build the application router with its middleware stack.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let environment = state.environment;

    Router::new()
        .route("/register", post(handle_register))
        .route("/login", post(handle_login))
        .route("/ping", get(handle_ping))
        .with_state(state)
        .layer(middleware::from_fn(log_request))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(catch_panic_layer(environment))
}
