//! Presentation templates for workouts.
//!
//! Both templates are selected by workout kind: list cards show pace and
//! cadence for runs, speed and elevation for rides.

use crate::tracker::types::Marker;
use crate::workouts::{Activity, Workout, WorkoutKind};
use std::fmt;
use uuid::Uuid;

/// One labeled value on a workout card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDetail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl CardDetail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// List entry for a workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutCard {
    /// Id used to find the workout again when the card is clicked
    pub id: Uuid,
    pub kind: WorkoutKind,
    pub title: String,
    pub details: Vec<CardDetail>,
}

impl WorkoutCard {
    pub fn from_workout(workout: &Workout) -> Self {
        let kind = workout.kind();
        let mut details = vec![
            CardDetail::new(kind.icon(), workout.distance_km().to_string(), "km"),
            CardDetail::new("⏱", workout.duration_min().to_string(), "min"),
        ];

        match workout.activity() {
            Activity::Running {
                cadence_spm,
                pace_min_per_km,
            } => {
                details.push(CardDetail::new("⚡️", format!("{:.1}", pace_min_per_km), "min/km"));
                details.push(CardDetail::new("🦶🏼", cadence_spm.to_string(), "spm"));
            }
            Activity::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => {
                details.push(CardDetail::new("⚡️", format!("{:.1}", speed_km_per_h), "km/h"));
                details.push(CardDetail::new("⛰", elevation_gain_m.to_string(), "m"));
            }
        }

        Self {
            id: workout.id(),
            kind,
            title: workout.description().to_string(),
            details,
        }
    }

    /// Style class of the card, e.g. `workout--running`.
    pub fn style_class(&self) -> String {
        format!("workout--{}", self.kind.as_str())
    }
}

impl fmt::Display for WorkoutCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  [{}]", self.title, self.id)?;
        for detail in &self.details {
            write!(f, "\n  {} {} {}", detail.icon, detail.value, detail.unit)?;
        }
        Ok(())
    }
}

/// Map marker for a workout, with a popup such as "🏃‍♂️ Running on April 3".
pub fn marker_for(workout: &Workout) -> Marker {
    let kind = workout.kind();
    Marker {
        coords: workout.coords(),
        popup_text: format!("{} {}", kind.icon(), workout.description()),
        style_class: format!("{}-popup", kind.as_str()),
    }
}
