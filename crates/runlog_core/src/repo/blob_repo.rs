//! Key-value blob repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Store whole serialized documents under fixed text keys.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `set` fully replaces the value stored under a key.
//! - Repositories are only built on connections that pass `check_ready`.

use crate::db::schema::check_ready;
use crate::db::StorageResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Persistence collaborator: a text store addressed by a single key.
pub trait BlobRepository {
    /// Returns the stored text, or `None` when the key was never written.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the stored text for `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// SQLite-backed blob repository over the `kv_store` table.
pub struct SqliteBlobRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobRepository<'conn> {
    /// Wraps a connection whose `kv_store` layout is current.
    ///
    /// # Errors
    /// - `SchemaNotReady` / `MissingTable` from `schema::check_ready`.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        check_ready(conn)?;
        Ok(Self { conn })
    }
}

impl BlobRepository for SqliteBlobRepository<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
