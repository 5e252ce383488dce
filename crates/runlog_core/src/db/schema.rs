//! Versioned layout of the `kv_store` table.
//!
//! # Invariants
//! - `UPGRADES[n]` moves a database from version `n` to `n + 1`.
//! - Upgrades run in one transaction together with the version bump.

use super::{StorageError, StorageResult};
use log::{debug, info};
use rusqlite::Connection;

/// Table holding the serialized run log.
pub const KV_TABLE: &str = "kv_store";

const UPGRADES: &[&str] = &[include_str!("sql/0001_kv_store.sql")];

/// Layout version this build reads and writes.
pub fn current_version() -> u32 {
    UPGRADES.len() as u32
}

/// Version recorded in the database file.
pub fn stored_version(conn: &Connection) -> StorageResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(version)
}

/// Brings `conn` to `current_version()`.
///
/// # Errors
/// - `SchemaTooNew` when the file comes from a newer build; it is left untouched.
pub fn upgrade(conn: &mut Connection) -> StorageResult<()> {
    let found = stored_version(conn)?;
    let supported = current_version();
    if found > supported {
        return Err(StorageError::SchemaTooNew { found, supported });
    }
    if found == supported {
        debug!("event=db_schema module=db status=current version={found}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for sql in &UPGRADES[found as usize..] {
        tx.execute_batch(sql)?;
    }
    tx.pragma_update(None, "user_version", supported)?;
    tx.commit()?;

    info!("event=db_schema module=db status=upgraded from_version={found} to_version={supported}");
    Ok(())
}

/// Fails unless `conn` is at the current version and still has `kv_store`.
pub fn check_ready(conn: &Connection) -> StorageResult<()> {
    let found = stored_version(conn)?;
    let expected = current_version();
    if found < expected {
        return Err(StorageError::SchemaNotReady { found, expected });
    }

    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [KV_TABLE],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(StorageError::MissingTable(KV_TABLE));
    }
    Ok(())
}
