//! Workout model: entry types and derived metrics.

pub mod metrics;
pub mod types;

pub use types::{
    describe, Activity, Coordinates, ValidationError, Workout, WorkoutInput, WorkoutKind,
};
