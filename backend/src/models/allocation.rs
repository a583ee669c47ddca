//! Allocation engine output records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::master::{CollectionPointId, DepotId, SortationWindow};
use super::time::TimeOfDay;

/// One trailer placed at a depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub collection_point_id: CollectionPointId,
    pub collection_point_name: String,
    pub trailer_number: u32,
    pub parcels: u32,
    pub depot_id: DepotId,
    pub depot_name: String,
    pub distance_miles: f64,
    pub collection_time: TimeOfDay,
    /// Estimated arrival, `HH:MM`; may exceed 23 hours for late departures.
    pub arrival_time: String,
    pub cost: f64,
    pub is_override: bool,
    /// Overflow placement: no ranked depot had room at arrival.
    pub is_peak_arrival: bool,
}

/// Why a trailer could not be placed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnassignedReason {
    /// The collection point has no distance ranking.
    NoRanking,
    /// Every ranked depot has non-positive effective capacity.
    NoDepotWithCapacity,
    /// A manual override names a depot that is not active for the run.
    OverrideDepotInactive,
}

/// A trailer that received no depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnassignedTrailer {
    pub collection_point_id: CollectionPointId,
    pub collection_point_name: String,
    pub trailer_number: u32,
    pub parcels: u32,
    pub collection_time: TimeOfDay,
    pub reason: UnassignedReason,
}

/// Result of one allocation run for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRun {
    pub date: NaiveDate,
    /// In processing order: collection time, then input order, then trailer number.
    pub allocations: Vec<Allocation>,
    pub unassigned: Vec<UnassignedTrailer>,
    /// Volume rows dropped because their collection point is unknown.
    pub skipped_volumes: Vec<CollectionPointId>,
    /// SHA-256 over `allocations` and `unassigned`; empty until fingerprinted.
    #[serde(default)]
    pub checksum: String,
}

impl AllocationRun {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            allocations: Vec::new(),
            unassigned: Vec::new(),
            skipped_volumes: Vec::new(),
            checksum: String::new(),
        }
    }

    pub fn total_parcels(&self) -> u64 {
        self.allocations.iter().map(|a| a.parcels as u64).sum()
    }

    pub fn total_cost(&self) -> f64 {
        self.allocations.iter().map(|a| a.cost).sum()
    }
}

/// Per-depot utilisation for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepotSummary {
    pub depot_id: DepotId,
    pub name: String,
    pub allocated_parcels: i64,
    pub trailer_count: usize,
    /// Base capacity or the date's capacity override.
    pub capacity: i64,
    pub has_capacity_override: bool,
    /// `allocated / capacity * 100`, 0 when capacity is 0.
    pub utilisation: f64,
    pub window: SortationWindow,
}
