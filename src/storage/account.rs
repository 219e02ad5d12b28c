//! Account record types

use chrono::{DateTime, Utc};

/// A persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub device_id: String,
    pub created_at: DateTime<Utc>,
}

/// Field values for an account that has not been persisted yet.
///
/// Values are expected to be normalized already (trimmed username,
/// trimmed lowercase email); the store writes them as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub device_id: String,
}
