//! Depot arrival estimate for a trailer.

use crate::models::{ClockMinutes, TimeOfDay};

/// Fixed loading time at the collection point, in minutes.
pub const LOADING_MINUTES: f64 = 60.0;
/// Assumed average road speed.
pub const TRAVEL_SPEED_MPH: f64 = 40.0;

/// `collection + loading + distance / speed`.
pub fn estimate_arrival(collection_time: TimeOfDay, distance_miles: f64) -> ClockMinutes {
    let travel_minutes = distance_miles / TRAVEL_SPEED_MPH * 60.0;
    ClockMinutes(collection_time.minutes() as f64 + LOADING_MINUTES + travel_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrival_example() {
        let arrival = estimate_arrival(TimeOfDay::DEFAULT_COLLECTION, 10.0);
        assert_eq!(arrival.value(), 615.0);
        assert_eq!(arrival.format_hhmm(), "10:15");
    }

    #[test]
    fn test_zero_distance_is_loading_only() {
        let t = TimeOfDay::from_hm(6, 30).unwrap();
        assert_eq!(estimate_arrival(t, 0.0).format_hhmm(), "07:30");
    }

    #[test]
    fn test_late_collection_runs_past_midnight() {
        let t = TimeOfDay::from_hm(22, 0).unwrap();
        assert_eq!(estimate_arrival(t, 120.0).format_hhmm(), "26:00");
    }
}
