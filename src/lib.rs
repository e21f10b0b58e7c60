//! Trailmark - map-based workout log
//!
//! Pick a spot on the map, enter a run or a ride, and Trailmark derives its
//! pace or speed, lists it, pins it on the map and keeps it across sessions.
//! The map, geolocation and on-screen list are collaborators behind traits;
//! this crate holds the workout model, the tracker that coordinates them and
//! the snapshot stores.

pub mod storage;
pub mod tracker;
pub mod workouts;

// Re-export commonly used types
pub use storage::config::AppConfig;
pub use storage::snapshot::SnapshotStore;
pub use tracker::controller::WorkoutTracker;
pub use workouts::types::{Coordinates, Workout, WorkoutInput, WorkoutKind};
