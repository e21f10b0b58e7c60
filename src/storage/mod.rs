//! Storage module for snapshots and configuration.

pub mod config;
pub mod database;
pub mod file_store;
pub mod schema;
pub mod snapshot;

pub use config::{AppConfig, ConfigError, MapSettings, StorageBackend, StorageSettings};
pub use database::{Database, DatabaseError, SqliteSnapshotStore};
pub use file_store::JsonFileStore;
pub use snapshot::{
    decode_snapshot, encode_snapshot, MemoryStore, SnapshotStore, StorageError, WorkoutRecord,
};

/// File name of the SQLite database inside the data directory.
pub const DATABASE_FILE: &str = "trailmark.db";

/// Open the snapshot store selected by the configuration.
pub fn open_store(config: &AppConfig) -> Result<Box<dyn SnapshotStore>, StorageError> {
    let key = config.storage.snapshot_key.as_str();

    let store: Box<dyn SnapshotStore> = match config.storage.backend {
        StorageBackend::Json => Box::new(JsonFileStore::new(&config.data_dir, key)),
        StorageBackend::Sqlite => {
            let db = Database::open(&config.data_dir.join(DATABASE_FILE))?;
            Box::new(SqliteSnapshotStore::new(db, key))
        }
    };

    tracing::info!(
        backend = %config.storage.backend,
        data_dir = %config.data_dir.display(),
        "Opened snapshot store"
    );
    Ok(store)
}
