//! Database schema definitions for Trailmark.

/// Schema migrations in the order they are applied, each with the version it
/// brings the database to.
pub const MIGRATIONS: &[(i32, &str)] = &[
    (
        1,
        r#"
-- Snapshots table: one serialized workout collection per key
CREATE TABLE IF NOT EXISTS snapshots (
    key TEXT PRIMARY KEY,
    payload TEXT NOT NULL,
    saved_at TEXT NOT NULL
);
"#,
    ),
    (
        2,
        r#"
CREATE INDEX IF NOT EXISTS idx_snapshots_saved_at ON snapshots(saved_at);
"#,
    ),
];

/// SQL for the schema version table
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 2;
