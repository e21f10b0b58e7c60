//! Unit tests for the workout model and its derived metrics.

use chrono::{Local, NaiveDate, TimeZone, Utc};
use trailmark::workouts::{
    describe, Activity, Coordinates, ValidationError, Workout, WorkoutInput, WorkoutKind,
};

fn spot() -> Coordinates {
    Coordinates::new(47.37, 8.54)
}

#[test]
fn test_pace_is_minutes_per_kilometer() {
    let cases = [(5.0, 25.0, 5.0), (10.0, 45.0, 4.5), (5.2, 24.0, 24.0 / 5.2), (0.4, 2.0, 5.0)];

    for (distance, duration, expected) in cases {
        let run = Workout::running(spot(), distance, duration, 170.0).unwrap();
        let pace = run.pace_min_per_km().unwrap();
        assert!(
            (pace - expected).abs() < 1e-9,
            "{} km in {} min: pace {}",
            distance,
            duration,
            pace
        );
        assert!(run.speed_km_per_h().is_none());
    }
}

#[test]
fn test_speed_is_kilometers_per_hour() {
    let cases = [(30.0, 60.0, 30.0), (27.0, 95.0, 27.0 / (95.0 / 60.0)), (10.0, 20.0, 30.0)];

    for (distance, duration, expected) in cases {
        let ride = Workout::cycling(spot(), distance, duration, 100.0).unwrap();
        let speed = ride.speed_km_per_h().unwrap();
        assert!((speed - expected).abs() < 1e-9);
        assert!(ride.pace_min_per_km().is_none());
    }
}

#[test]
fn test_metrics_are_positive_and_finite() {
    for distance in [0.1, 1.0, 7.5, 42.195, 160.0] {
        for duration in [1.0, 12.5, 60.0, 600.0] {
            let run = Workout::running(spot(), distance, duration, 180.0).unwrap();
            let pace = run.pace_min_per_km().unwrap();
            assert!(pace.is_finite() && pace > 0.0);

            let ride = Workout::cycling(spot(), distance, duration, -50.0).unwrap();
            let speed = ride.speed_km_per_h().unwrap();
            assert!(speed.is_finite() && speed > 0.0);
        }
    }
}

#[test]
fn test_running_scenario() {
    let run = Workout::running(spot(), 5.2, 24.0, 178.0).unwrap();

    assert_eq!(run.kind(), WorkoutKind::Running);
    assert_eq!(run.distance_km(), 5.2);
    assert_eq!(run.duration_min(), 24.0);
    assert!((run.pace_min_per_km().unwrap() - 4.615).abs() < 0.001);
    match run.activity() {
        Activity::Running { cadence_spm, .. } => assert_eq!(*cadence_spm, 178.0),
        other => panic!("expected running activity, got {:?}", other),
    }
    assert_eq!(
        run.description(),
        describe(
            WorkoutKind::Running,
            run.created_at().with_timezone(&Local).date_naive()
        )
    );
}

#[test]
fn test_cycling_scenario() {
    let ride = Workout::cycling(spot(), 27.0, 95.0, 250.0).unwrap();

    assert_eq!(ride.kind(), WorkoutKind::Cycling);
    assert!((ride.speed_km_per_h().unwrap() - 17.05).abs() < 0.01);
    assert!(ride.description().starts_with("Cycling on "));
}

#[test]
fn test_descriptions_name_month_and_day() {
    let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();

    assert_eq!(describe(WorkoutKind::Running, date(1, 1)), "Running on January 1");
    assert_eq!(describe(WorkoutKind::Cycling, date(4, 3)), "Cycling on April 3");
    assert_eq!(describe(WorkoutKind::Running, date(12, 31)), "Running on December 31");
}

#[test]
fn test_create_uses_local_date_of_timestamp() {
    let created_at = Utc.with_ymd_and_hms(2024, 7, 14, 12, 0, 0).unwrap();
    let input = WorkoutInput::Running {
        distance_km: 8.0,
        duration_min: 40.0,
        cadence_spm: 172.0,
    };

    let run = Workout::create(spot(), input, created_at).unwrap();
    let local_day = created_at.with_timezone(&Local).date_naive();
    assert_eq!(run.created_at(), created_at);
    assert_eq!(run.description(), describe(WorkoutKind::Running, local_day));
    assert_eq!(run.input(), input);
}

#[test]
fn test_ids_are_unique() {
    let a = Workout::running(spot(), 5.0, 25.0, 170.0).unwrap();
    let b = Workout::running(spot(), 5.0, 25.0, 170.0).unwrap();
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let rejected = [
        Workout::running(spot(), 0.0, 25.0, 170.0),
        Workout::running(spot(), -3.0, 25.0, 170.0),
        Workout::running(spot(), 5.0, f64::NAN, 170.0),
        Workout::running(spot(), 5.0, 25.0, f64::INFINITY),
        Workout::running(spot(), 5.0, 25.0, 0.0),
        Workout::cycling(spot(), 20.0, 0.0, 100.0),
        Workout::cycling(spot(), f64::NEG_INFINITY, 60.0, 100.0),
        Workout::cycling(spot(), 20.0, 60.0, f64::NAN),
    ];

    for result in rejected {
        let err = result.unwrap_err();
        assert_eq!(err.user_message(), "Inputs have to be positive numbers!");
    }
}

#[test]
fn test_elevation_may_be_negative_or_zero() {
    assert!(Workout::cycling(spot(), 20.0, 60.0, -300.0).is_ok());
    assert!(Workout::cycling(spot(), 20.0, 60.0, 0.0).is_ok());
}

#[test]
fn test_rejection_names_the_field() {
    let err = Workout::running(spot(), 5.0, 25.0, -1.0).unwrap_err();
    assert_eq!(
        err,
        ValidationError::NotPositive {
            field: "cadence",
            value: -1.0
        }
    );
}

#[test]
fn test_kind_parsing() {
    assert_eq!("running".parse::<WorkoutKind>().unwrap(), WorkoutKind::Running);
    assert_eq!(" Cycling ".parse::<WorkoutKind>().unwrap(), WorkoutKind::Cycling);
    assert!(matches!(
        "swimming".parse::<WorkoutKind>(),
        Err(ValidationError::UnknownKind(_))
    ));
    assert_eq!(WorkoutKind::default(), WorkoutKind::Running);
}
