//! SQLite implementation of the LedgerStore trait.
//!
//! The database is used as a key-value surface: the whole chain is one JSON
//! array stored under a single named key. Reads load the whole value; an
//! append reads, pushes and rewrites the value inside one transaction.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use landledger_core::{now_millis, LandRecord};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::LedgerStore;

/// The key the chain is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "landRecords";

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Mutex<Connection>,
    /// Key the chain is stored under.
    key: String,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self::from_connection(conn))
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Store the chain under a different key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The key the chain is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::LockPoisoned(format!("mutex poisoned: {}", e)))
    }
}

/// Load the chain stored under `key`.
///
/// A missing key is an empty chain. So is a value that does not decode:
/// the failure is logged and the chain reads as empty.
fn load(conn: &Connection, key: &str) -> Result<Vec<LandRecord>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;

    let Some(value) = value else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<LandRecord>>(&value) {
        Ok(records) => {
            tracing::debug!(key, count = records.len(), "loaded ledger");
            Ok(records)
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "stored ledger is unreadable; treating as empty");
            Ok(Vec::new())
        }
    }
}

/// Replace the whole value under `key`.
///
/// The value must decode back into records before it is written. Non-finite
/// floats encode as `null`, and an unreadable value would load as an empty
/// chain.
fn store(conn: &Connection, key: &str, records: &[LandRecord]) -> Result<()> {
    let value =
        serde_json::to_string(records).map_err(|e| StoreError::Serialization(e.to_string()))?;
    serde_json::from_str::<Vec<LandRecord>>(&value).map_err(|e| {
        StoreError::Serialization(format!("ledger value would not read back: {e}"))
    })?;

    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, now_millis()],
    )?;

    tracing::debug!(key, count = records.len(), "wrote ledger");
    Ok(())
}

impl LedgerStore for SqliteStore {
    fn append(&self, record: &LandRecord) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let mut records = load(&tx, &self.key)?;
        records.push(record.clone());
        store(&tx, &self.key, &records)?;

        tx.commit()?;
        Ok(())
    }

    fn all(&self) -> Result<Vec<LandRecord>> {
        let conn = self.lock()?;
        load(&conn, &self.key)
    }
}
