//! Snapshot persistence of the workout collection.
//!
//! The whole collection is written as one JSON array of workout records and
//! read back in one piece. Records carry every field, derived metrics
//! included, but those metrics are only informational: restoring a record
//! runs it through the workout factory again.

use crate::storage::database::DatabaseError;
use crate::workouts::{Coordinates, Workout, WorkoutInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Backend holding the serialized workout collection.
pub trait SnapshotStore {
    /// Read the stored snapshot, `None` if nothing has been saved.
    fn read_snapshot(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored snapshot.
    fn write_snapshot(&mut self, payload: &str) -> Result<(), StorageError>;

    /// Remove the stored snapshot.
    fn clear_snapshot(&mut self) -> Result<(), StorageError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn read_snapshot(&self) -> Result<Option<String>, StorageError> {
        (**self).read_snapshot()
    }

    fn write_snapshot(&mut self, payload: &str) -> Result<(), StorageError> {
        (**self).write_snapshot(payload)
    }

    fn clear_snapshot(&mut self) -> Result<(), StorageError> {
        (**self).clear_snapshot()
    }
}

/// In-memory snapshot store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    payload: Option<String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a snapshot.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    /// The currently stored snapshot.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn read_snapshot(&self) -> Result<Option<String>, StorageError> {
        Ok(self.payload.clone())
    }

    fn write_snapshot(&mut self, payload: &str) -> Result<(), StorageError> {
        self.payload = Some(payload.to_string());
        Ok(())
    }

    fn clear_snapshot(&mut self) -> Result<(), StorageError> {
        self.payload = None;
        Ok(())
    }
}

/// Stored form of a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: Uuid,
    /// Creation timestamp
    pub date: DateTime<Utc>,
    /// `[lat, lng]`
    pub coords: [f64; 2],
    /// Kilometers
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    pub description: String,
    #[serde(flatten)]
    pub activity: ActivityRecord,
}

/// Kind-specific part of a stored workout, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActivityRecord {
    Running {
        cadence: f64,
        pace: f64,
    },
    #[serde(rename_all = "camelCase")]
    Cycling {
        elevation_gain: f64,
        speed: f64,
    },
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let activity = match workout.input() {
            WorkoutInput::Running { cadence_spm, .. } => ActivityRecord::Running {
                cadence: cadence_spm,
                pace: workout.pace_min_per_km().unwrap_or_default(),
            },
            WorkoutInput::Cycling {
                elevation_gain_m, ..
            } => ActivityRecord::Cycling {
                elevation_gain: elevation_gain_m,
                speed: workout.speed_km_per_h().unwrap_or_default(),
            },
        };

        Self {
            id: workout.id(),
            date: workout.created_at(),
            coords: workout.coords().into(),
            distance: workout.distance_km(),
            duration: workout.duration_min(),
            description: workout.description().to_string(),
            activity,
        }
    }
}

impl WorkoutRecord {
    /// Rebuild the workout, validating it and recomputing its metric.
    pub fn into_workout(self) -> Result<Workout, crate::workouts::ValidationError> {
        let input = match self.activity {
            ActivityRecord::Running { cadence, .. } => WorkoutInput::Running {
                distance_km: self.distance,
                duration_min: self.duration,
                cadence_spm: cadence,
            },
            ActivityRecord::Cycling { elevation_gain, .. } => WorkoutInput::Cycling {
                distance_km: self.distance,
                duration_min: self.duration,
                elevation_gain_m: elevation_gain,
            },
        };

        Workout::restore(
            self.id,
            self.date,
            Coordinates::from(self.coords),
            input,
            self.description,
        )
    }
}

/// Serialize the collection, preserving order.
pub fn encode_snapshot(workouts: &[Workout]) -> Result<String, StorageError> {
    let records: Vec<WorkoutRecord> = workouts.iter().map(WorkoutRecord::from).collect();
    serde_json::to_string(&records).map_err(|e| StorageError::SerializationError(e.to_string()))
}

/// Deserialize a snapshot into workouts, in stored order.
///
/// A payload that is not a JSON array fails as a whole. Individual records
/// that cannot be parsed, fail validation or repeat an earlier id are skipped.
pub fn decode_snapshot(payload: &str) -> Result<Vec<Workout>, StorageError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(payload)
        .map_err(|e| StorageError::DeserializationError(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut workouts = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let record: WorkoutRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable workout record");
                continue;
            }
        };

        let id = record.id;
        if !seen.insert(id) {
            tracing::warn!(index, %id, "Skipping workout record with duplicate id");
            continue;
        }

        match record.into_workout() {
            Ok(workout) => workouts.push(workout),
            Err(e) => {
                tracing::warn!(index, %id, error = %e, "Skipping invalid workout record");
            }
        }
    }

    Ok(workouts)
}

/// Errors from snapshot storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// Backend refused the operation (e.g. quota exceeded)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
