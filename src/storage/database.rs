//! Database operations using rusqlite.
//!
//! The database holds workout snapshots keyed by name, one row per key.
//! [`SqliteSnapshotStore`] exposes a single key as a [`SnapshotStore`].

use crate::storage::schema::{CURRENT_VERSION, MIGRATIONS, SCHEMA_VERSION_TABLE};
use crate::storage::snapshot::{SnapshotStore, StorageError};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::path::Path;
use thiserror::Error;

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        Self::with_connection(conn)
    }

    /// Wrap a connection, bringing its schema up to [`CURRENT_VERSION`].
    fn with_connection(conn: Connection) -> Result<Self, DatabaseError> {
        conn.execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let db = Self { conn };
        let applied = db.schema_version()?;
        for &(version, sql) in MIGRATIONS.iter().filter(|(version, _)| *version > applied) {
            db.apply_migration(version, sql)?;
        }

        tracing::debug!(version = CURRENT_VERSION, "Snapshot database ready");
        Ok(db)
    }

    /// Highest migration applied so far, 0 for a fresh database.
    fn schema_version(&self) -> Result<i32, DatabaseError> {
        self.conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |row| row.get(0),
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Run one migration and record it, all or nothing.
    fn apply_migration(&self, version: i32, sql: &str) -> Result<(), DatabaseError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        tx.execute_batch(sql)
            .map_err(|e| DatabaseError::MigrationFailed(format!("version {}: {}", version, e)))?;
        tx.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        tx.commit()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        tracing::info!(version, "Snapshot database migrated");
        Ok(())
    }

    // ========== Snapshot Operations ==========

    /// Save the snapshot payload for a key, replacing any previous one.
    pub fn save_snapshot(&self, key: &str, payload: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO snapshots (key, payload, saved_at)
                 VALUES (?1, ?2, datetime('now'))",
                params![key, payload],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Load the snapshot payload for a key.
    pub fn load_snapshot(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let result: SqliteResult<String> = self.conn.query_row(
            "SELECT payload FROM snapshots WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(payload) => Ok(Some(payload)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Delete the snapshot for a key.
    pub fn clear_snapshot(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM snapshots WHERE key = ?1", params![key])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}

/// Snapshot store keeping one key of a [`Database`].
pub struct SqliteSnapshotStore {
    db: Database,
    key: String,
}

impl SqliteSnapshotStore {
    /// Use `key` within `db`.
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// The underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn read_snapshot(&self) -> Result<Option<String>, StorageError> {
        Ok(self.db.load_snapshot(&self.key)?)
    }

    fn write_snapshot(&mut self, payload: &str) -> Result<(), StorageError> {
        self.db.save_snapshot(&self.key, payload)?;
        tracing::debug!(key = %self.key, bytes = payload.len(), "Saved snapshot row");
        Ok(())
    }

    fn clear_snapshot(&mut self) -> Result<(), StorageError> {
        Ok(self.db.clear_snapshot(&self.key)?)
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}
