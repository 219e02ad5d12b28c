//! SQLite-backed account store.
//!
//! Table:
//! - `accounts`: id, username, email (unique), password, device_id (unique), created_at
//!
//! Field constraints are declared in the schema so the store rejects bad
//! records on its own, independent of handler validation.

use chrono::Utc;
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{Connection, ErrorCode, params};

use super::{Account, AccountStore, NewAccount};
use crate::error::{StoreError, UniqueField};

/// URL scheme accepted in front of a database path.
const SQLITE_SCHEME: &str = "sqlite://";

/// Special database path for a private in-memory database.
const IN_MEMORY: &str = ":memory:";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS accounts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL CHECK (length(username) >= 3),
        email TEXT NOT NULL UNIQUE COLLATE NOCASE CHECK (email <> ''),
        password TEXT NOT NULL CHECK (length(password) >= 6),
        device_id TEXT NOT NULL UNIQUE CHECK (device_id <> ''),
        created_at TEXT NOT NULL
    );";

/// Account store over a single SQLite connection.
pub struct SqliteAccountStore {
    conn: Mutex<Connection>,
}

impl SqliteAccountStore {
    /// Open (or create) the store named by a connection string.
    ///
    /// Accepts `sqlite://<path>`, a bare path, or `:memory:`.
    pub fn open(database_url: &str) -> Result<Self, StoreError> {
        let target = database_url
            .strip_prefix(SQLITE_SCHEME)
            .unwrap_or(database_url);

        let conn = if target == IN_MEMORY {
            Connection::open_in_memory()?
        } else {
            Connection::open(target)?
        };

        info!("Account store opened at {}", target);
        Self::from_connection(conn)
    }

    /// Open a private in-memory store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        // WAL mode for concurrent reads + crash safety
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of stored accounts.
    pub fn count(&self) -> Result<u64, StoreError> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl AccountStore for SqliteAccountStore {
    fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let conn = self.conn.lock();
        let row = conn.query_row(
            "SELECT id, username, email, password, device_id, created_at
             FROM accounts WHERE email = ?1",
            params![email],
            |row| {
                Ok(Account {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                    password: row.get(3)?,
                    device_id: row.get(4)?,
                    created_at: row.get(5)?,
                })
            },
        );

        match row {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let created_at = Utc::now();

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO accounts (username, email, password, device_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account.username,
                account.email,
                account.password,
                account.device_id,
                created_at,
            ],
        )
        .map_err(map_insert_error)?;

        let id = conn.last_insert_rowid();
        debug!("Inserted account {} for {}", id, account.email);

        Ok(Account {
            id,
            username: account.username,
            email: account.email,
            password: account.password,
            device_id: account.device_id,
            created_at,
        })
    }
}

/// Translate SQLite constraint failures into store-level errors.
fn map_insert_error(err: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(failure, message) = &err {
        if failure.code == ErrorCode::ConstraintViolation {
            let detail = message.clone().unwrap_or_else(|| err.to_string());

            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
                if detail.contains("accounts.device_id") {
                    return StoreError::DuplicateKey(UniqueField::DeviceId);
                }
                if detail.contains("accounts.email") {
                    return StoreError::DuplicateKey(UniqueField::Email);
                }
            }

            return StoreError::ConstraintViolation(detail);
        }
    }

    StoreError::Backend(err)
}
