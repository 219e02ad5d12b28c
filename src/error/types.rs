//! Error types
//!
//! Defines domain-specific error types for each layer of the server.

use serde::Serialize;
use std::fmt;
use std::io;
use thiserror::Error;

/// Account columns that carry a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    DeviceId,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::Email => write!(f, "email"),
            UniqueField::DeviceId => write!(f, "deviceId"),
        }
    }
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Account store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key: an account with this {0} already exists")]
    DuplicateKey(UniqueField),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("store backend error: {0}")]
    Backend(#[from] rusqlite::Error),
}

/// Registration and login errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("invalid credentials")]
    Unauthorized,

    #[error("unrecognized device")]
    Forbidden,

    #[error(transparent)]
    Store(StoreError),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Startup and serving errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("account store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
