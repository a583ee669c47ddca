//! Greedy, priority-ordered trailer-to-depot assignment.
//!
//! Volumes are processed by ascending collection time (stable on input order),
//! and each collection point's trailers in trailer-number order. Every trailer
//! goes to, in order of preference:
//!
//! 1. the depot named by a manual override for (collection point, trailer,
//!    collection time), with no capacity check;
//! 2. the nearest ranked depot whose time-adjusted capacity still fits the
//!    trailer on top of what the run has already placed there;
//! 3. the nearest ranked depot with any positive capacity, flagged as a peak
//!    arrival.
//!
//! Trailers that match none of these are reported as unassigned.
//!
//! The only mutable state is [`AllocationState`], a per-depot running total
//! owned by a single run.

use log::{debug, info, warn};
use std::collections::HashMap;

use super::arrival::estimate_arrival;
use super::capacity::available_capacity;
use super::cost::FeeSchedule;
use super::overrides::{OverrideSet, TrailerKey};
use crate::models::{
    Allocation, AllocationRun, CollectionPoint, CpDepotDistance, DailyVolume, Depot, DepotId,
    PlanningSnapshot, TimeOfDay, UnassignedReason, UnassignedTrailer,
};

/// Parcels placed at each depot so far in one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationState {
    allocated: HashMap<DepotId, i64>,
}

impl AllocationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocated(&self, depot_id: &DepotId) -> i64 {
        self.allocated.get(depot_id).copied().unwrap_or(0)
    }

    pub fn record(&mut self, depot_id: &DepotId, parcels: u32) {
        *self.allocated.entry(depot_id.clone()).or_insert(0) += i64::from(parcels);
    }
}

/// Where one trailer ended up.
#[derive(Debug, Clone, PartialEq)]
struct Placement {
    depot_id: DepotId,
    is_override: bool,
    is_peak_arrival: bool,
}

/// A single trailer awaiting placement.
struct Trailer<'v> {
    point: &'v CollectionPoint,
    number: u32,
    parcels: u32,
    collection_time: TimeOfDay,
}

/// Allocation engine bound to one planning snapshot.
pub struct AllocationEngine<'a> {
    snapshot: &'a PlanningSnapshot,
    fees: FeeSchedule,
    overrides: OverrideSet,
    depots: HashMap<&'a DepotId, &'a Depot>,
    capacities: HashMap<&'a DepotId, i64>,
}

impl<'a> AllocationEngine<'a> {
    pub fn new(snapshot: &'a PlanningSnapshot, fees: FeeSchedule) -> Self {
        let overrides = OverrideSet::for_date(
            snapshot.date,
            &snapshot.manual_overrides,
            &snapshot.capacity_overrides,
        );
        let depots = snapshot.depots.iter().map(|d| (&d.id, d)).collect();
        let capacities = snapshot
            .depots
            .iter()
            .map(|d| (&d.id, overrides.effective_capacity(d)))
            .collect();

        Self {
            snapshot,
            fees,
            overrides,
            depots,
            capacities,
        }
    }

    pub fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }

    /// Effective capacity of an active depot for the snapshot date; 0 if unknown.
    pub fn effective_capacity(&self, depot_id: &DepotId) -> i64 {
        self.capacities.get(depot_id).copied().unwrap_or(0)
    }

    /// Run the allocation and return the run together with the final state.
    pub fn run(&self) -> (AllocationRun, AllocationState) {
        let mut state = AllocationState::new();
        let mut run = AllocationRun::empty(self.snapshot.date);
        debug!(
            "Allocating {} volume rows for {} with {} manual and {} capacity overrides",
            self.snapshot.volumes.len(),
            self.snapshot.date,
            self.overrides.manual_count(),
            self.overrides.capacity_count()
        );

        let mut volumes: Vec<&DailyVolume> = self.snapshot.volumes.iter().collect();
        volumes.sort_by_key(|v| v.effective_collection_time());

        for volume in volumes {
            let Some(point) = self.snapshot.collection_points.get(&volume.collection_point_id)
            else {
                warn!(
                    "Skipping volume row for unknown collection point '{}' on {}",
                    volume.collection_point_id, self.snapshot.date
                );
                run.skipped_volumes.push(volume.collection_point_id.clone());
                continue;
            };

            let ranking = self.snapshot.ranking(&point.id);
            let collection_time = volume.effective_collection_time();

            for number in 1..=volume.effective_trailers() {
                let trailer = Trailer {
                    point,
                    number,
                    parcels: volume.trailer_parcels(number),
                    collection_time,
                };

                match self.place(&state, &trailer, ranking) {
                    Ok(placement) => {
                        state.record(&placement.depot_id, trailer.parcels);
                        run.allocations
                            .push(self.describe(&trailer, ranking, placement));
                    }
                    Err(reason) => {
                        warn!(
                            "Trailer {} of {} ({} parcels) left unassigned: {:?}",
                            number, point.id, trailer.parcels, reason
                        );
                        run.unassigned.push(UnassignedTrailer {
                            collection_point_id: point.id.clone(),
                            collection_point_name: point.name.clone(),
                            trailer_number: number,
                            parcels: trailer.parcels,
                            collection_time,
                            reason,
                        });
                    }
                }
            }
        }

        info!(
            "Allocated {} trailers ({} parcels) for {}; {} unassigned, {} volume rows skipped",
            run.allocations.len(),
            run.total_parcels(),
            run.date,
            run.unassigned.len(),
            run.skipped_volumes.len()
        );

        (run, state)
    }

    fn place(
        &self,
        state: &AllocationState,
        trailer: &Trailer<'_>,
        ranking: &[CpDepotDistance],
    ) -> Result<Placement, UnassignedReason> {
        let key = TrailerKey::new(
            trailer.point.id.clone(),
            trailer.number,
            trailer.collection_time,
        );
        if let Some(forced) = self.overrides.forced_depot(&key) {
            if !self.depots.contains_key(forced) {
                return Err(UnassignedReason::OverrideDepotInactive);
            }
            debug!(
                "Trailer {} of {} forced to {} by manual override",
                trailer.number, trailer.point.id, forced
            );
            return Ok(Placement {
                depot_id: forced.clone(),
                is_override: true,
                is_peak_arrival: false,
            });
        }

        let parcels = i64::from(trailer.parcels);
        for candidate in ranking {
            let Some(depot) = self.depots.get(&candidate.depot_id) else {
                continue;
            };
            let base = self.effective_capacity(&depot.id);
            if base <= 0 {
                continue;
            }

            let arrival = estimate_arrival(trailer.collection_time, candidate.distance_miles);
            let available = available_capacity(base, depot.window, arrival);
            if state.allocated(&depot.id) + parcels <= available {
                debug!(
                    "Trailer {} of {} -> {} (rank {}, arrival {}, {} available)",
                    trailer.number,
                    trailer.point.id,
                    depot.id,
                    candidate.rank,
                    arrival.format_hhmm(),
                    available
                );
                return Ok(Placement {
                    depot_id: depot.id.clone(),
                    is_override: false,
                    is_peak_arrival: false,
                });
            }
        }

        if ranking.is_empty() {
            return Err(UnassignedReason::NoRanking);
        }

        ranking
            .iter()
            .find(|c| self.depots.contains_key(&c.depot_id) && self.effective_capacity(&c.depot_id) > 0)
            .map(|c| {
                warn!(
                    "Trailer {} of {} has no depot with room; peak arrival at {}",
                    trailer.number, trailer.point.id, c.depot_id
                );
                Placement {
                    depot_id: c.depot_id.clone(),
                    is_override: false,
                    is_peak_arrival: true,
                }
            })
            .ok_or(UnassignedReason::NoDepotWithCapacity)
    }

    fn describe(
        &self,
        trailer: &Trailer<'_>,
        ranking: &[CpDepotDistance],
        placement: Placement,
    ) -> Allocation {
        let distance_miles = ranking
            .iter()
            .find(|c| c.depot_id == placement.depot_id)
            .map(|c| c.distance_miles)
            .unwrap_or(0.0);
        let depot_name = self
            .depots
            .get(&placement.depot_id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| placement.depot_id.to_string());

        Allocation {
            collection_point_id: trailer.point.id.clone(),
            collection_point_name: trailer.point.name.clone(),
            trailer_number: trailer.number,
            parcels: trailer.parcels,
            depot_id: placement.depot_id,
            depot_name,
            distance_miles,
            collection_time: trailer.collection_time,
            arrival_time: estimate_arrival(trailer.collection_time, distance_miles).format_hhmm(),
            cost: self.fees.cost(distance_miles),
            is_override: placement.is_override,
            is_peak_arrival: placement.is_peak_arrival,
        }
    }
}

/// Allocate every trailer in `snapshot` under `fees`.
pub fn allocate(snapshot: &PlanningSnapshot, fees: FeeSchedule) -> AllocationRun {
    AllocationEngine::new(snapshot, fees).run().0
}
