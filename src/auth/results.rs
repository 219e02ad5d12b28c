//! Authentication result types
//!
//! Defines result structures returned by authentication operations.

use serde::{Deserialize, Serialize};

use crate::storage::Account;

/// The public view of an account returned to clients.
///
/// Never carries the password or the device identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    pub email: String,
}

impl From<Account> for UserSummary {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            email: account.email,
        }
    }
}
