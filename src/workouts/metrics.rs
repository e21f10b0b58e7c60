//! Derived workout metrics.
//!
//! Pace and speed are inverses of each other in different units, so the two
//! functions divide in opposite directions. Callers must have validated that
//! both inputs are finite and positive.

/// Minutes per hour, used to convert a duration in minutes to hours.
const MINUTES_PER_HOUR: f64 = 60.0;

/// Running pace in minutes per kilometer.
pub fn pace_min_per_km(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// Cycling speed in kilometers per hour.
pub fn speed_km_per_h(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / MINUTES_PER_HOUR)
}
