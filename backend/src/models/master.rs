//! Master data: collection points and depots.
//!
//! These records are owned by external collaborators (setup screens, bulk
//! loaders) and are read-only for the duration of an allocation run.

use serde::{Deserialize, Serialize};

use super::time::TimeOfDay;

crate::define_code_type!(CollectionPointId);
crate::define_code_type!(DepotId);

/// Geographic position in decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A source location generating parcel volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionPoint {
    pub id: CollectionPointId,
    pub name: String,
    #[serde(flatten)]
    pub location: GeoPoint,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Daily processing window of a depot. Capacity ramps down linearly between
/// `start` and `cutoff`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortationWindow {
    #[serde(default = "default_start")]
    pub start: TimeOfDay,
    #[serde(default = "default_cutoff")]
    pub cutoff: TimeOfDay,
}

fn default_start() -> TimeOfDay {
    TimeOfDay::DEFAULT_SORTATION_START
}

fn default_cutoff() -> TimeOfDay {
    TimeOfDay::DEFAULT_CUTOFF
}

impl SortationWindow {
    pub fn new(start: TimeOfDay, cutoff: TimeOfDay) -> Self {
        Self { start, cutoff }
    }

    /// Length of the window in minutes; zero or negative for a degenerate window.
    pub fn length_minutes(&self) -> i64 {
        self.cutoff.minutes() as i64 - self.start.minutes() as i64
    }

    pub fn is_degenerate(&self) -> bool {
        self.length_minutes() <= 0
    }
}

impl Default for SortationWindow {
    fn default() -> Self {
        Self {
            start: TimeOfDay::DEFAULT_SORTATION_START,
            cutoff: TimeOfDay::DEFAULT_CUTOFF,
        }
    }
}

/// A destination sortation facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    pub id: DepotId,
    pub name: String,
    #[serde(flatten)]
    pub location: GeoPoint,
    /// Base daily capacity in parcels.
    pub daily_capacity: i64,
    #[serde(default, rename = "sortation")]
    pub window: SortationWindow,
    #[serde(default = "default_true")]
    pub is_active: bool,
}
