//! Tracker module: the controller and the collaborators it drives.

pub mod collaborators;
pub mod controller;
pub mod headless;
pub mod render;
pub mod types;

pub use collaborators::{GeolocationProvider, MapProvider, WorkoutView};
pub use controller::WorkoutTracker;
pub use headless::{ConsoleView, FixedPosition, LoggingMap};
pub use render::{marker_for, CardDetail, WorkoutCard};
pub use types::{
    FormFields, GeolocationError, MapError, MapHandle, MapStatus, Marker, TrackerError,
    TrackerState,
};
