//! SQLite storage for the run log blob.
//!
//! A database holds one table, `kv_store`, whose layout is tracked through
//! `PRAGMA user_version`. Connections from `open_db` / `open_db_in_memory`
//! are already at the current layout; `schema::check_ready` guards
//! connections opened anywhere else.

mod open;
pub mod schema;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub use open::{open_db, open_db_in_memory};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure of the SQLite layer under the run store.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build of the run log.
    SchemaTooNew { found: u32, supported: u32 },
    /// The connection was never brought to the current layout.
    SchemaNotReady { found: u32, expected: u32 },
    /// The layout version is current but the table was dropped.
    MissingTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "run log database version {found} is newer than supported {supported}"
            ),
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "run log database is at version {found}; open it with open_db to reach {expected}"
            ),
            Self::MissingTable(table) => write!(f, "run log table `{table}` is missing"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
