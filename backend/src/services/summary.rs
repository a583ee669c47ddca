//! Per-depot utilisation roll-up of an allocation run.

use std::collections::HashMap;

use crate::algorithms::OverrideSet;
use crate::models::{Allocation, Depot, DepotId, DepotSummary};

/// Utilisation percentage; 0 when `capacity` is not positive.
pub fn utilisation(allocated: i64, capacity: i64) -> f64 {
    if capacity <= 0 {
        return 0.0;
    }
    allocated as f64 / capacity as f64 * 100.0
}

/// Roll allocations up per depot.
///
/// Rows come out in `depots` order and only for depots that received at least
/// one parcel. Capacity is the effective capacity for the run date.
pub fn summarize(
    allocations: &[Allocation],
    depots: &[Depot],
    overrides: &OverrideSet,
) -> Vec<DepotSummary> {
    let mut totals: HashMap<&DepotId, (i64, usize)> = HashMap::new();
    for allocation in allocations {
        let entry = totals.entry(&allocation.depot_id).or_insert((0, 0));
        entry.0 += i64::from(allocation.parcels);
        entry.1 += 1;
    }

    depots
        .iter()
        .filter_map(|depot| {
            let (allocated, trailers) = totals.get(&depot.id).copied()?;
            if allocated <= 0 {
                return None;
            }
            let capacity = overrides.effective_capacity(depot);
            Some(DepotSummary {
                depot_id: depot.id.clone(),
                name: depot.name.clone(),
                allocated_parcels: allocated,
                trailer_count: trailers,
                capacity,
                has_capacity_override: overrides.has_capacity_override(&depot.id),
                utilisation: utilisation(allocated, capacity),
                window: depot.window,
            })
        })
        .collect()
}

/// Most utilised first. Ties keep their current order.
pub fn sort_by_utilisation_desc(rows: &mut [DepotSummary]) {
    rows.sort_by(|a, b| b.utilisation.total_cmp(&a.utilisation));
}

/// Keep only `depot_id`'s row, or everything when `depot_id` is `None`.
pub fn filter_depot(rows: Vec<DepotSummary>, depot_id: Option<&DepotId>) -> Vec<DepotSummary> {
    match depot_id {
        Some(id) => rows.into_iter().filter(|r| &r.depot_id == id).collect(),
        None => rows,
    }
}
