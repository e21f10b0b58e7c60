//! Collaborators the tracker drives.
//!
//! Map drawing, geolocation and the on-screen list and form live outside
//! the core. The tracker only talks to them through these traits, which keeps
//! it testable with simple doubles.

use crate::tracker::types::{GeolocationError, MapError, MapHandle, Marker, TrackerError};
use crate::workouts::{Coordinates, Workout, WorkoutKind};

/// Map widget.
///
/// User clicks on the map are delivered to the tracker through
/// [`WorkoutTracker::map_clicked`](crate::tracker::WorkoutTracker::map_clicked).
pub trait MapProvider {
    /// Create the map centered on `center`. A successful return means the
    /// map is ready for markers.
    fn initialize(&mut self, center: Coordinates, zoom: u8) -> Result<MapHandle, MapError>;

    /// Add a marker with an open popup.
    fn place_marker(&mut self, handle: &MapHandle, marker: &Marker);

    /// Move the view to `coords`.
    fn pan_to(&mut self, handle: &MapHandle, coords: Coordinates, zoom: u8);
}

/// Source of the user's current position. One request, one outcome.
pub trait GeolocationProvider {
    fn request_current_position(&mut self) -> Result<Coordinates, GeolocationError>;
}

/// Workout list and input form.
pub trait WorkoutView {
    /// Show a workout in the list, using the template for its kind.
    fn render_list_item(&mut self, workout: &Workout);

    /// Open the input form.
    fn show_form(&mut self);

    /// Clear the form inputs and hide the form.
    fn hide_form(&mut self);

    /// Show the cadence field for runs or the elevation field for rides.
    fn toggle_kind_fields(&mut self, kind: WorkoutKind);

    /// Tell the user something went wrong.
    fn show_error(&mut self, error: &TrackerError);

    /// Rebuild the whole presentation from scratch.
    fn reload(&mut self);
}
