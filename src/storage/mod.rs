//! Account storage
//!
//! Defines the store contract used by the request handlers and its
//! SQLite-backed implementation.

pub mod account;
pub mod sqlite;

pub use account::{Account, NewAccount};
pub use sqlite::SqliteAccountStore;

use crate::error::StoreError;

/// Durable mapping from email to account record.
///
/// Implementations must enforce email and device-id uniqueness atomically
/// inside `insert`; callers may pre-check with `find_by_email` but must not
/// rely on it.
pub trait AccountStore: Send + Sync {
    /// Look up an account by its normalized email.
    fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Persist a new account, stamping its creation time.
    fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;
}
