//! SQLite storage bootstrap, schema migrations and connection supervision.
//!
//! # Responsibility
//! - Open and configure SQLite connections for menagerie core.
//! - Apply schema migrations in deterministic order.
//! - Own the single long-lived connection through [`Gateway`].
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod gateway;
pub mod migrations;
mod open;

pub use gateway::{ConnectOptions, ConnectionStatus, DbLocation, Gateway};
pub use open::{open_db, open_db_in_memory, open_db_with_options};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection string could not be mapped to a SQLite location.
    InvalidUrl(String),
    /// Gateway has no open connection.
    Unavailable(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::InvalidUrl(url) => write!(f, "unsupported database url `{url}`"),
            Self::Unavailable(reason) => write!(f, "database unavailable: {reason}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::InvalidUrl(_) | Self::Unavailable(_) => {
                None
            }
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
