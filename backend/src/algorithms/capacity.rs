//! Time-windowed depot capacity.
//!
//! A depot's base capacity `C` is fully available for arrivals up to the start
//! of sortation, ramps down linearly across the window and is exhausted at the
//! cutoff:
//!
//! ```text
//! capacity
//!    C ┤━━━━━━━━┓
//!      │         ╲
//!      │           ╲
//!    0 ┤             ╲━━━━━━━━
//!      └─────────┬────┬──────── arrival
//!              start cutoff
//! ```

use crate::models::{ClockMinutes, SortationWindow};

/// Capacity available to a trailer arriving at `arrival`.
pub fn available_capacity(base_capacity: i64, window: SortationWindow, arrival: ClockMinutes) -> i64 {
    let t = arrival.value();
    let start = window.start.minutes() as f64;
    let cutoff = window.cutoff.minutes() as f64;

    if t <= start {
        return base_capacity;
    }
    if t >= cutoff || window.is_degenerate() {
        return 0;
    }

    let remaining_fraction = (cutoff - t) / (cutoff - start);
    (base_capacity as f64 * remaining_fraction).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeOfDay;

    fn window(start: (u32, u32), cutoff: (u32, u32)) -> SortationWindow {
        SortationWindow::new(
            TimeOfDay::from_hm(start.0, start.1).unwrap(),
            TimeOfDay::from_hm(cutoff.0, cutoff.1).unwrap(),
        )
    }

    #[test]
    fn test_full_before_start() {
        let w = window((8, 0), (18, 0));
        assert_eq!(available_capacity(2000, w, ClockMinutes(420.0)), 2000);
        assert_eq!(available_capacity(2000, w, ClockMinutes(480.0)), 2000);
    }

    #[test]
    fn test_zero_at_or_after_cutoff() {
        let w = window((8, 0), (18, 0));
        assert_eq!(available_capacity(2000, w, ClockMinutes(1080.0)), 0);
        assert_eq!(available_capacity(2000, w, ClockMinutes(1300.0)), 0);
    }

    #[test]
    fn test_linear_ramp() {
        let w = window((8, 0), (18, 0));
        // 10:15 leaves 465 of 600 minutes.
        assert_eq!(available_capacity(2000, w, ClockMinutes(615.0)), 1550);
        // Midpoint.
        assert_eq!(available_capacity(2000, w, ClockMinutes(780.0)), 1000);
        // Floors fractional parcels.
        assert_eq!(available_capacity(1000, w, ClockMinutes(481.0)), 998);
    }

    #[test]
    fn test_degenerate_window() {
        let w = window((18, 0), (8, 0));
        assert_eq!(available_capacity(500, w, ClockMinutes(1100.0)), 0);
        assert_eq!(available_capacity(500, w, ClockMinutes(1200.0)), 0);
        // Arrivals before start still see the full base.
        assert_eq!(available_capacity(500, w, ClockMinutes(300.0)), 500);
    }
}
