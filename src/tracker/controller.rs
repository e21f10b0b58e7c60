//! Workout tracker: owns the workout collection and reacts to user events.
//!
//! Every handler runs to completion on `&mut self`; there is no background
//! work. The collection is written to the snapshot store after each accepted
//! workout. A failed write is reported but the workout stays in memory.

use crate::storage::config::MapSettings;
use crate::storage::snapshot::{decode_snapshot, encode_snapshot, SnapshotStore, StorageError};
use crate::tracker::collaborators::{GeolocationProvider, MapProvider, WorkoutView};
use crate::tracker::render::marker_for;
use crate::tracker::types::{FormFields, MapHandle, MapStatus, TrackerError, TrackerState};
use crate::workouts::{Coordinates, ValidationError, Workout, WorkoutInput, WorkoutKind};
use chrono::Utc;
use uuid::Uuid;

/// Mediates between user input, the workout collection, its snapshot store
/// and the presentation collaborators.
pub struct WorkoutTracker<S, M, G, V> {
    store: S,
    map: M,
    geolocation: G,
    view: V,
    zoom_level: u8,
    workouts: Vec<Workout>,
    state: TrackerState,
    map_status: MapStatus,
    loaded: bool,
}

impl<S, M, G, V> WorkoutTracker<S, M, G, V>
where
    S: SnapshotStore,
    M: MapProvider,
    G: GeolocationProvider,
    V: WorkoutView,
{
    /// Create a tracker with an empty collection. Nothing is loaded or
    /// requested until [`start`](Self::start).
    pub fn new(store: S, map: M, geolocation: G, view: V, settings: &MapSettings) -> Self {
        Self {
            store,
            map,
            geolocation,
            view,
            zoom_level: settings.zoom_level,
            workouts: Vec::new(),
            state: TrackerState::Idle,
            map_status: MapStatus::Pending,
            loaded: false,
        }
    }

    /// Restore saved workouts, then request the user's position and set up
    /// the map around it.
    ///
    /// A geolocation or map failure is shown to the user and returned; the
    /// map stays unavailable until the tracker is reset.
    pub fn start(&mut self) -> Result<(), TrackerError> {
        self.load_from_persistence();

        if self.map_status != MapStatus::Pending {
            tracing::debug!(status = ?self.map_status, "Map already set up");
            return Ok(());
        }

        let setup = self
            .geolocation
            .request_current_position()
            .map_err(TrackerError::from)
            .and_then(|coords| {
                tracing::info!(%coords, "Position acquired");
                Ok(self.map.initialize(coords, self.zoom_level)?)
            });

        match setup {
            Ok(handle) => {
                self.on_map_ready(handle);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Map setup failed");
                self.map_status = MapStatus::Unavailable;
                self.view.show_error(&e);
                Err(e)
            }
        }
    }

    fn on_map_ready(&mut self, handle: MapHandle) {
        self.map_status = MapStatus::Ready(handle);
        if self.state == TrackerState::Idle {
            self.state = TrackerState::AwaitingMapClick;
        }

        for workout in &self.workouts {
            self.map.place_marker(&handle, &marker_for(workout));
        }

        tracing::info!(markers = self.workouts.len(), "Map ready");
    }

    /// Open the form for a workout at the clicked spot.
    pub fn map_clicked(&mut self, coords: Coordinates) -> Result<(), TrackerError> {
        if !self.is_map_ready() {
            return Err(TrackerError::MapNotReady);
        }

        self.state = TrackerState::FormOpen { coords };
        self.view.show_form();
        Ok(())
    }

    /// Swap the kind-specific form field.
    pub fn kind_changed(&mut self, kind: WorkoutKind) {
        self.view.toggle_kind_fields(kind);
    }

    /// Close the form without adding a workout.
    pub fn cancel_form(&mut self) -> Result<(), TrackerError> {
        match self.state {
            TrackerState::FormOpen { .. } => {
                self.view.hide_form();
                self.state = TrackerState::AwaitingMapClick;
                Ok(())
            }
            _ => Err(TrackerError::NoFormOpen),
        }
    }

    /// Validate the form and add the workout it describes.
    ///
    /// On success the form is cleared and hidden. On rejection the form stays
    /// open with its contents and the error is shown.
    pub fn submit_form(&mut self, fields: &FormFields) -> Result<&Workout, TrackerError> {
        let coords = match self.state {
            TrackerState::FormOpen { coords } => coords,
            _ => return Err(TrackerError::NoFormOpen),
        };

        self.state = TrackerState::Validating { coords };

        match self.commit(coords, fields.to_input()) {
            Ok(index) => {
                self.view.hide_form();
                self.state = TrackerState::AwaitingMapClick;
                Ok(&self.workouts[index])
            }
            Err(e) => {
                self.state = TrackerState::FormOpen { coords };
                let err = TrackerError::Validation(e);
                self.view.show_error(&err);
                Err(err)
            }
        }
    }

    /// Pan the map to the workout behind a clicked list item.
    pub fn list_item_clicked(&mut self, id: Uuid) -> Result<(), TrackerError> {
        let coords = self.find_by_id(id)?.coords();
        let MapStatus::Ready(handle) = self.map_status else {
            return Err(TrackerError::MapNotReady);
        };

        self.map.pan_to(&handle, coords, self.zoom_level);
        Ok(())
    }

    /// Add a workout at `coords`.
    ///
    /// Rejected input leaves the collection, the view and the store untouched.
    pub fn add_entry(
        &mut self,
        coords: Coordinates,
        input: WorkoutInput,
    ) -> Result<&Workout, TrackerError> {
        let index = self.commit(coords, input)?;
        Ok(&self.workouts[index])
    }

    fn commit(&mut self, coords: Coordinates, input: WorkoutInput) -> Result<usize, ValidationError> {
        let workout = Workout::create(coords, input, Utc::now())?;

        // Saved workouts must be in the collection before it is written back.
        if !self.loaded {
            self.load_from_persistence();
        }

        tracing::info!(id = %workout.id(), kind = %workout.kind(), "Workout added");

        self.workouts.push(workout);
        let index = self.workouts.len() - 1;
        let workout = &self.workouts[index];

        if let MapStatus::Ready(handle) = self.map_status {
            self.map.place_marker(&handle, &marker_for(workout));
        }
        self.view.render_list_item(workout);

        if let Err(e) = self.persist_all() {
            tracing::warn!(error = %e, "Workout kept in memory only");
            self.view.show_error(&TrackerError::Persistence(e));
        }

        Ok(index)
    }

    /// Look up a workout by id.
    pub fn find_by_id(&self, id: Uuid) -> Result<&Workout, TrackerError> {
        self.workouts
            .iter()
            .find(|w| w.id() == id)
            .ok_or(TrackerError::NotFound(id))
    }

    /// Restore the collection from the snapshot store.
    ///
    /// A missing or unreadable snapshot leaves the collection empty without
    /// surfacing an error. Restored workouts are listed in stored order; their
    /// markers wait for the map unless it is already up. Runs once, either
    /// from [`start`](Self::start) or before the first added workout is
    /// saved, and again only after [`reset_all`](Self::reset_all).
    pub fn load_from_persistence(&mut self) -> &[Workout] {
        if self.loaded {
            tracing::debug!("Snapshot already loaded");
            return &self.workouts;
        }
        self.loaded = true;

        let payload = match self.store.read_snapshot() {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                tracing::debug!("No saved workouts");
                return &self.workouts;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not read saved workouts");
                return &self.workouts;
            }
        };

        let restored = match decode_snapshot(&payload) {
            Ok(restored) => restored,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable snapshot");
                return &self.workouts;
            }
        };

        for workout in &restored {
            self.view.render_list_item(workout);
            if let MapStatus::Ready(handle) = self.map_status {
                self.map.place_marker(&handle, &marker_for(workout));
            }
        }

        tracing::info!(count = restored.len(), "Restored workouts");
        self.workouts = restored;
        &self.workouts
    }

    /// Write the whole collection to the snapshot store.
    pub fn persist_all(&mut self) -> Result<(), StorageError> {
        let payload = encode_snapshot(&self.workouts)?;
        self.store.write_snapshot(&payload)?;
        tracing::debug!(count = self.workouts.len(), "Persisted workouts");
        Ok(())
    }

    /// Delete every workout, in the store and in memory, and reload the view.
    ///
    /// If the store cannot be cleared nothing changes. Afterwards the tracker
    /// is back in its initial state and needs [`start`](Self::start) again.
    pub fn reset_all(&mut self) -> Result<(), TrackerError> {
        self.store.clear_snapshot()?;

        let removed = self.workouts.len();
        self.workouts.clear();
        self.state = TrackerState::Idle;
        self.map_status = MapStatus::Pending;
        self.loaded = false;
        self.view.reload();

        tracing::info!(removed, "Reset all workouts");
        Ok(())
    }

    /// Workouts in insertion order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn map_status(&self) -> MapStatus {
        self.map_status
    }

    pub fn is_map_ready(&self) -> bool {
        matches!(self.map_status, MapStatus::Ready(_))
    }

    pub fn zoom_level(&self) -> u8 {
        self.zoom_level
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn geolocation(&self) -> &G {
        &self.geolocation
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}
