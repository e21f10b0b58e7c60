//! Terminal stand-ins for the map, geolocation and view collaborators.
//!
//! Used by the command-line binary to drive the tracker without a GUI.

use crate::tracker::collaborators::{GeolocationProvider, MapProvider, WorkoutView};
use crate::tracker::render::WorkoutCard;
use crate::tracker::types::{GeolocationError, MapError, MapHandle, Marker, TrackerError};
use crate::workouts::{Coordinates, Workout, WorkoutKind};
use std::io::Write;

/// Writes workout cards and errors to a text stream.
pub struct ConsoleView<W: Write> {
    out: W,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!(error = %e, "Console write failed");
        }
    }
}

impl<W: Write> WorkoutView for ConsoleView<W> {
    fn render_list_item(&mut self, workout: &Workout) {
        let card = WorkoutCard::from_workout(workout);
        self.line(&card.to_string());
    }

    fn show_form(&mut self) {
        tracing::debug!("Form opened");
    }

    fn hide_form(&mut self) {
        tracing::debug!("Form cleared");
    }

    fn toggle_kind_fields(&mut self, kind: WorkoutKind) {
        tracing::debug!(%kind, "Form fields switched");
    }

    fn show_error(&mut self, error: &TrackerError) {
        self.line(&format!("error: {}", error.user_message()));
    }

    fn reload(&mut self) {
        self.line("All workouts removed.");
    }
}

/// Map that records what it was asked to draw.
#[derive(Debug, Default)]
pub struct LoggingMap {
    center: Option<Coordinates>,
    markers: Vec<Marker>,
    view: Option<(Coordinates, u8)>,
}

impl LoggingMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Where the map currently looks, with its zoom level.
    pub fn view(&self) -> Option<(Coordinates, u8)> {
        self.view
    }

    pub fn center(&self) -> Option<Coordinates> {
        self.center
    }
}

impl MapProvider for LoggingMap {
    fn initialize(&mut self, center: Coordinates, zoom: u8) -> Result<MapHandle, MapError> {
        self.center = Some(center);
        self.view = Some((center, zoom));
        tracing::info!(%center, zoom, "Map initialized");
        Ok(MapHandle::new(1))
    }

    fn place_marker(&mut self, _handle: &MapHandle, marker: &Marker) {
        tracing::debug!(coords = %marker.coords, popup = %marker.popup_text, "Marker placed");
        self.markers.push(marker.clone());
    }

    fn pan_to(&mut self, _handle: &MapHandle, coords: Coordinates, zoom: u8) {
        tracing::info!(%coords, zoom, "Map panned");
        self.view = Some((coords, zoom));
    }
}

/// Geolocation source reporting a configured position, or a denial if none
/// is configured.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition {
    position: Option<Coordinates>,
}

impl FixedPosition {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

impl GeolocationProvider for FixedPosition {
    fn request_current_position(&mut self) -> Result<Coordinates, GeolocationError> {
        self.position.ok_or(GeolocationError::Denied)
    }
}
