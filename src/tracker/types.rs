//! Tracker types: interaction state, map handles, form input and errors.

use crate::storage::StorageError;
use crate::workouts::{Coordinates, ValidationError, WorkoutInput, WorkoutKind};
use thiserror::Error;
use uuid::Uuid;

/// Opaque reference to an initialized map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapHandle(u64);

impl MapHandle {
    /// Wrap a provider-specific map id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A marker to place on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Marker position
    pub coords: Coordinates,
    /// Text of the popup attached to the marker
    pub popup_text: String,
    /// Style class of the popup
    pub style_class: String,
}

/// Where the add-workout interaction currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrackerState {
    /// Map not ready yet; no form can open
    #[default]
    Idle,
    /// Map ready, waiting for the user to pick a spot
    AwaitingMapClick,
    /// Form open for a workout at the picked spot
    FormOpen { coords: Coordinates },
    /// Form submitted, input being checked
    Validating { coords: Coordinates },
}

/// Lifecycle of the map collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapStatus {
    /// Waiting for a position to center on
    #[default]
    Pending,
    /// Map initialized and accepting markers
    Ready(MapHandle),
    /// Position or map setup failed; stays this way for the session
    Unavailable,
}

/// Raw text of the workout form.
///
/// Only the field matching `kind` is read out of cadence and elevation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl FormFields {
    /// Convert the text fields into a workout input.
    ///
    /// Empty fields read as zero and unparseable ones as NaN, so both are
    /// rejected later by validation rather than here.
    pub fn to_input(&self) -> WorkoutInput {
        let distance_km = parse_field(&self.distance);
        let duration_min = parse_field(&self.duration);

        match self.kind {
            WorkoutKind::Running => WorkoutInput::Running {
                distance_km,
                duration_min,
                cadence_spm: parse_field(&self.cadence),
            },
            WorkoutKind::Cycling => WorkoutInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m: parse_field(&self.elevation),
            },
        }
    }
}

fn parse_field(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// Map provider failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct MapError(pub String);

/// Geolocation failure. Either way the map cannot be set up this session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// The user refused to share their position
    #[error("Permission denied")]
    Denied,

    /// No position could be determined
    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the workout tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Rejected workout input
    #[error("Invalid workout: {0}")]
    Validation(#[from] ValidationError),

    /// No workout with this id
    #[error("Workout not found: {0}")]
    NotFound(Uuid),

    /// Snapshot could not be saved or cleared
    #[error("Persistence failed: {0}")]
    Persistence(#[from] StorageError),

    /// Position could not be acquired
    #[error("Could not get your position: {0}")]
    Geolocation(#[from] GeolocationError),

    /// Map provider failed to initialize
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    /// Operation needs a ready map
    #[error("Map is not ready")]
    MapNotReady,

    /// Operation needs an open form
    #[error("No workout form is open")]
    NoFormOpen,
}

impl TrackerError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::Validation(e) => e.user_message().to_string(),
            TrackerError::Geolocation(_) => "Could not get your position".to_string(),
            other => other.to_string(),
        }
    }
}
