//! Workout entry types.
//!
//! A [`Workout`] is built once through a validating factory and never changes
//! afterwards. Kind-specific data and the derived metric live in the
//! [`Activity`] sum type, so every decision that depends on the kind is an
//! exhaustive `match`.

use crate::workouts::metrics::{pace_min_per_km, speed_km_per_h};
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Month names used in descriptions, independent of the system locale.
const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(coords: Coordinates) -> Self {
        [coords.lat, coords.lng]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Kind of workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    /// Running, tracked with cadence and pace
    #[default]
    Running,
    /// Cycling, tracked with elevation gain and speed
    Cycling,
}

impl WorkoutKind {
    /// Lowercase identifier, as used in snapshots and style classes.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Icon shown next to the workout in lists and popups.
    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutKind::Running => write!(f, "Running"),
            WorkoutKind::Cycling => write!(f, "Cycling"),
        }
    }
}

impl FromStr for WorkoutKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// User input for a new workout, before validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutInput {
    /// A run
    Running {
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    },
    /// A ride
    Cycling {
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    },
}

impl WorkoutInput {
    /// Kind of workout this input describes.
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutInput::Running { .. } => WorkoutKind::Running,
            WorkoutInput::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Check the numeric fields.
    ///
    /// Distance, duration and cadence must be finite and positive. Elevation
    /// gain only has to be finite: a ride may end lower than it started.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            WorkoutInput::Running {
                distance_km,
                duration_min,
                cadence_spm,
            } => {
                require_positive("distance", distance_km)?;
                require_positive("duration", duration_min)?;
                require_positive("cadence", cadence_spm)
            }
            WorkoutInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => {
                require_positive("distance", distance_km)?;
                require_positive("duration", duration_min)?;
                require_finite("elevation gain", elevation_gain_m)
            }
        }
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}

/// Kind-specific data of a workout, with its derived metric.
#[derive(Debug, Clone, PartialEq)]
pub enum Activity {
    /// Running data
    Running {
        /// Steps per minute
        cadence_spm: f64,
        /// Minutes per kilometer
        pace_min_per_km: f64,
    },
    /// Cycling data
    Cycling {
        /// Elevation gain in meters
        elevation_gain_m: f64,
        /// Kilometers per hour
        speed_km_per_h: f64,
    },
}

impl Activity {
    /// Kind of workout this activity belongs to.
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// A recorded workout.
///
/// Fields are private: once constructed a workout is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: Uuid,
    created_at: DateTime<Utc>,
    coords: Coordinates,
    distance_km: f64,
    duration_min: f64,
    description: String,
    activity: Activity,
}

impl Workout {
    /// Create a running workout timestamped now.
    pub fn running(
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Result<Self, ValidationError> {
        let input = WorkoutInput::Running {
            distance_km,
            duration_min,
            cadence_spm,
        };
        Self::create(coords, input, Utc::now())
    }

    /// Create a cycling workout timestamped now.
    pub fn cycling(
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Result<Self, ValidationError> {
        let input = WorkoutInput::Cycling {
            distance_km,
            duration_min,
            elevation_gain_m,
        };
        Self::create(coords, input, Utc::now())
    }

    /// Create a workout with a fresh id, deriving its metric and description.
    pub fn create(
        coords: Coordinates,
        input: WorkoutInput,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        input.validate()?;
        let description = describe(input.kind(), created_at.with_timezone(&Local).date_naive());
        Ok(Self::assemble(Uuid::new_v4(), created_at, coords, input, description))
    }

    /// Rebuild a stored workout.
    ///
    /// The input is validated again and the derived metric recomputed. The id,
    /// timestamp and description are kept as stored.
    pub fn restore(
        id: Uuid,
        created_at: DateTime<Utc>,
        coords: Coordinates,
        input: WorkoutInput,
        description: String,
    ) -> Result<Self, ValidationError> {
        input.validate()?;
        Ok(Self::assemble(id, created_at, coords, input, description))
    }

    fn assemble(
        id: Uuid,
        created_at: DateTime<Utc>,
        coords: Coordinates,
        input: WorkoutInput,
        description: String,
    ) -> Self {
        let (distance_km, duration_min, activity) = match input {
            WorkoutInput::Running {
                distance_km,
                duration_min,
                cadence_spm,
            } => (
                distance_km,
                duration_min,
                Activity::Running {
                    cadence_spm,
                    pace_min_per_km: pace_min_per_km(distance_km, duration_min),
                },
            ),
            WorkoutInput::Cycling {
                distance_km,
                duration_min,
                elevation_gain_m,
            } => (
                distance_km,
                duration_min,
                Activity::Cycling {
                    elevation_gain_m,
                    speed_km_per_h: speed_km_per_h(distance_km, duration_min),
                },
            ),
        };

        Self {
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            description,
            activity,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn kind(&self) -> WorkoutKind {
        self.activity.kind()
    }

    /// Pace in min/km, for runs only.
    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.activity {
            Activity::Running {
                pace_min_per_km, ..
            } => Some(pace_min_per_km),
            Activity::Cycling { .. } => None,
        }
    }

    /// Speed in km/h, for rides only.
    pub fn speed_km_per_h(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            Activity::Running { .. } => None,
        }
    }

    /// The raw input this workout was built from.
    pub fn input(&self) -> WorkoutInput {
        match self.activity {
            Activity::Running { cadence_spm, .. } => WorkoutInput::Running {
                distance_km: self.distance_km,
                duration_min: self.duration_min,
                cadence_spm,
            },
            Activity::Cycling {
                elevation_gain_m, ..
            } => WorkoutInput::Cycling {
                distance_km: self.distance_km,
                duration_min: self.duration_min,
                elevation_gain_m,
            },
        }
    }
}

/// Build a label such as "Running on April 3".
pub fn describe(kind: WorkoutKind, date: NaiveDate) -> String {
    format!("{} on {} {}", kind, MONTHS[date.month0() as usize], date.day())
}

/// Rejected workout input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// NaN or infinite value
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    /// Zero or negative value
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// Workout type other than running or cycling
    #[error("Unknown workout type: {0}")]
    UnknownKind(String),
}

impl ValidationError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::NotFinite { .. } | ValidationError::NotPositive { .. } => {
                "Inputs have to be positive numbers!"
            }
            ValidationError::UnknownKind(_) => "Choose running or cycling.",
        }
    }
}
