//! Integration tests for saving and restoring the workout collection.

use super::support::{
    new_tracker, tracker_with, FlakyStore, RecordingMap, RecordingView, StubGeolocation, ViewEvent,
    LONDON,
};
use tempfile::TempDir;
use trailmark::storage::{
    decode_snapshot, Database, JsonFileStore, MapSettings, MemoryStore, SnapshotStore,
    SqliteSnapshotStore,
};
use trailmark::tracker::{MapStatus, TrackerState};
use trailmark::workouts::{Coordinates, WorkoutInput, WorkoutKind};
use trailmark::WorkoutTracker;
use uuid::Uuid;

fn run(distance_km: f64, duration_min: f64, cadence_spm: f64) -> WorkoutInput {
    WorkoutInput::Running {
        distance_km,
        duration_min,
        cadence_spm,
    }
}

fn ride(distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> WorkoutInput {
    WorkoutInput::Cycling {
        distance_km,
        duration_min,
        elevation_gain_m,
    }
}

/// A store holding two saved workouts, with their ids.
fn saved_store() -> (FlakyStore, Vec<Uuid>) {
    let mut tracker = new_tracker();
    let a = tracker.add_entry(LONDON, run(5.2, 24.0, 178.0)).unwrap().id();
    let b = tracker
        .add_entry(Coordinates::new(48.85, 2.35), ride(27.0, 95.0, 250.0))
        .unwrap()
        .id();
    (tracker.store().clone(), vec![a, b])
}

#[test]
fn test_restart_restores_collection() {
    let (store, ids) = saved_store();
    let before = tracker_with(store.clone()).load_from_persistence().to_vec();

    let mut tracker = tracker_with(store);
    tracker.start().unwrap();

    let restored: Vec<Uuid> = tracker.workouts().iter().map(|w| w.id()).collect();
    assert_eq!(restored, ids);
    assert_eq!(tracker.workouts(), before.as_slice());

    let first = &tracker.workouts()[0];
    assert_eq!(first.kind(), WorkoutKind::Running);
    assert_eq!(first.coords(), LONDON);
    assert!((first.pace_min_per_km().unwrap() - 24.0 / 5.2).abs() < 1e-9);

    let second = &tracker.workouts()[1];
    assert_eq!(second.kind(), WorkoutKind::Cycling);
    assert!((second.speed_km_per_h().unwrap() - 27.0 / (95.0 / 60.0)).abs() < 1e-9);

    assert_eq!(tracker.view().list_items(), ids);
    assert_eq!(tracker.map().markers.len(), 2);
}

#[test]
fn test_restored_markers_wait_for_map() {
    let (store, ids) = saved_store();
    let mut tracker = tracker_with(store);

    tracker.load_from_persistence();
    assert_eq!(tracker.view().list_items(), ids);
    assert!(tracker.map().markers.is_empty());
    assert_eq!(tracker.map_status(), MapStatus::Pending);

    tracker.start().unwrap();
    let marker_coords: Vec<Coordinates> = tracker.map().markers.iter().map(|m| m.coords).collect();
    assert_eq!(marker_coords, vec![LONDON, Coordinates::new(48.85, 2.35)]);
    // Loading again during start did not duplicate list items
    assert_eq!(tracker.view().list_items(), ids);
}

#[test]
fn test_persist_then_load_is_stable() {
    let (store, _) = saved_store();
    let first_payload = store.inner.payload().unwrap().to_string();

    let mut tracker = tracker_with(store);
    tracker.load_from_persistence();
    tracker.persist_all().unwrap();

    assert_eq!(tracker.store().inner.payload().unwrap(), first_payload);
}

#[test]
fn test_missing_or_corrupt_snapshot_loads_nothing() {
    for payload in [None, Some("not json"), Some("{\"id\": 1}"), Some("[]")] {
        let inner = match payload {
            Some(p) => MemoryStore::with_payload(p),
            None => MemoryStore::new(),
        };
        let mut tracker = tracker_with(FlakyStore {
            inner,
            ..Default::default()
        });

        assert!(tracker.load_from_persistence().is_empty());
        assert!(tracker.view().errors().is_empty());
        tracker.start().unwrap();
        assert!(tracker.is_map_ready());
    }
}

#[test]
fn test_invalid_records_are_skipped() {
    let (store, ids) = saved_store();
    let mut records: Vec<serde_json::Value> =
        serde_json::from_str(store.inner.payload().unwrap()).unwrap();
    records.push(serde_json::json!({ "type": "swimming", "distance": 1.0 }));
    records.push(records[0].clone());
    let payload = serde_json::to_string(&records).unwrap();

    let mut tracker = tracker_with(FlakyStore {
        inner: MemoryStore::with_payload(payload),
        ..Default::default()
    });
    let restored: Vec<Uuid> = tracker
        .load_from_persistence()
        .iter()
        .map(|w| w.id())
        .collect();
    assert_eq!(restored, ids);
}

#[test]
fn test_entries_added_before_load_follow_restored_ones() {
    let (store, ids) = saved_store();
    let mut tracker = tracker_with(store);

    let early = tracker.add_entry(LONDON, run(3.0, 20.0, 160.0)).unwrap().id();
    tracker.load_from_persistence();

    let order: Vec<Uuid> = tracker.workouts().iter().map(|w| w.id()).collect();
    assert_eq!(order, vec![ids[0], ids[1], early]);
    assert_eq!(tracker.view().list_items(), vec![ids[0], ids[1], early]);
}

#[test]
fn test_early_add_keeps_saved_history() {
    let (store, ids) = saved_store();
    let mut tracker = tracker_with(store);

    let early = tracker.add_entry(LONDON, run(3.0, 20.0, 160.0)).unwrap().id();

    let saved = decode_snapshot(tracker.store().inner.payload().unwrap()).unwrap();
    let saved_ids: Vec<Uuid> = saved.iter().map(|w| w.id()).collect();
    assert_eq!(saved_ids, vec![ids[0], ids[1], early]);

    // A fresh session sees all three
    let mut next = tracker_with(tracker.store().clone());
    assert_eq!(next.load_from_persistence().len(), 3);
}

#[test]
fn test_add_after_reset_starts_fresh_history() {
    let (store, ids) = saved_store();
    let mut tracker = tracker_with(store);
    tracker.start().unwrap();
    tracker.reset_all().unwrap();

    // Reset cleared the store; a new add starts a fresh history
    let fresh = tracker.add_entry(LONDON, run(4.0, 22.0, 168.0)).unwrap().id();
    let saved = decode_snapshot(tracker.store().inner.payload().unwrap()).unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id(), fresh);
    assert!(saved.iter().all(|w| !ids.contains(&w.id())));
}

#[test]
fn test_reset_clears_everything() {
    let (store, _) = saved_store();
    let mut tracker = tracker_with(store);
    tracker.start().unwrap();
    assert_eq!(tracker.workouts().len(), 2);

    tracker.reset_all().unwrap();

    assert!(tracker.workouts().is_empty());
    assert!(tracker.store().inner.payload().is_none());
    assert_eq!(tracker.state(), TrackerState::Idle);
    assert_eq!(tracker.map_status(), MapStatus::Pending);
    assert_eq!(tracker.view().events.last(), Some(&ViewEvent::Reload));

    // The next session starts from nothing
    assert!(tracker.load_from_persistence().is_empty());
    let mut next = tracker_with(tracker.store().clone());
    next.start().unwrap();
    assert!(next.workouts().is_empty());
    assert!(next.map().markers.is_empty());
}

#[test]
fn test_reset_on_empty_store() {
    let mut tracker = new_tracker();
    tracker.reset_all().unwrap();
    assert!(tracker.workouts().is_empty());
}

#[test]
fn test_json_file_store_across_sessions() {
    let dir = TempDir::new().unwrap();
    let session = |store: JsonFileStore| {
        WorkoutTracker::new(
            store,
            RecordingMap::default(),
            StubGeolocation::at(LONDON),
            RecordingView::default(),
            &MapSettings::default(),
        )
    };

    let mut tracker = session(JsonFileStore::new(dir.path(), "workouts"));
    tracker.start().unwrap();
    let id = tracker
        .add_entry(LONDON, ride(42.0, 120.0, 600.0))
        .unwrap()
        .id();
    assert!(dir.path().join("workouts.json").exists());

    let mut tracker = session(JsonFileStore::new(dir.path(), "workouts"));
    tracker.start().unwrap();
    assert_eq!(tracker.workouts().len(), 1);
    assert_eq!(tracker.workouts()[0].id(), id);

    tracker.reset_all().unwrap();
    assert!(!dir.path().join("workouts.json").exists());
}

#[test]
fn test_sqlite_store_across_sessions() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("trailmark.db");
    let session = |path: &std::path::Path| {
        let db = Database::open(path).unwrap();
        WorkoutTracker::new(
            SqliteSnapshotStore::new(db, "workouts"),
            RecordingMap::default(),
            StubGeolocation::at(LONDON),
            RecordingView::default(),
            &MapSettings::default(),
        )
    };

    let mut tracker = session(&db_path);
    let id = tracker.add_entry(LONDON, run(21.1, 105.0, 176.0)).unwrap().id();
    drop(tracker);

    let mut tracker = session(&db_path);
    let restored = tracker.load_from_persistence();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].id(), id);
    assert!(tracker.store().read_snapshot().unwrap().is_some());
}
