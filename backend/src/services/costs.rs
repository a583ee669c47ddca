//! Expected transport cost report and run overview.

use std::collections::{HashMap, HashSet};

use crate::models::{
    Allocation, AllocationRun, CollectionPointCost, CostFilter, CostReport, CostTotals, DepotCost,
    RunOverview,
};

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn matches(filter: &CostFilter, allocation: &Allocation) -> bool {
    match filter {
        CostFilter::All => true,
        CostFilter::CollectionPoint(id) => &allocation.collection_point_id == id,
        CostFilter::Depot(id) => &allocation.depot_id == id,
    }
}

/// Running totals for one group, keyed by first appearance.
#[derive(Default)]
struct Bucket {
    name: String,
    trailers: usize,
    parcels: u64,
    miles: f64,
    cost: f64,
}

impl Bucket {
    fn add(&mut self, allocation: &Allocation) {
        self.trailers += 1;
        self.parcels += u64::from(allocation.parcels);
        self.miles += allocation.distance_miles;
        self.cost += allocation.cost;
    }
}

fn group_by<'a, K, F>(allocations: &[&'a Allocation], key: F) -> Vec<(K, Bucket)>
where
    K: Clone + Eq + std::hash::Hash,
    F: Fn(&'a Allocation) -> (K, &'a str),
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<(K, Bucket)> = Vec::new();
    for allocation in allocations {
        let (k, name) = key(*allocation);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            buckets.push((
                k,
                Bucket {
                    name: name.to_string(),
                    ..Default::default()
                },
            ));
            buckets.len() - 1
        });
        buckets[slot].1.add(allocation);
    }
    // Stable: equal costs keep first-appearance order.
    buckets.sort_by(|a, b| b.1.cost.total_cmp(&a.1.cost));
    buckets
}

/// Expected cost for the allocations in `run` that match `filter`.
pub fn cost_report(run: &AllocationRun, filter: &CostFilter) -> CostReport {
    let selected: Vec<&Allocation> = run
        .allocations
        .iter()
        .filter(|a| matches(filter, a))
        .collect();

    let total_cost: f64 = selected.iter().map(|a| a.cost).sum();
    let total_parcels: u64 = selected.iter().map(|a| u64::from(a.parcels)).sum();
    let summary = CostTotals {
        total_cost,
        total_miles: selected.iter().map(|a| a.distance_miles).sum(),
        total_trailers: selected.len(),
        total_parcels,
        avg_cost_per_trailer: ratio(total_cost, selected.len() as f64),
        cost_per_parcel: ratio(total_cost, total_parcels as f64),
    };

    let by_collection_point = group_by(&selected, |a| {
        (a.collection_point_id.clone(), a.collection_point_name.as_str())
    })
    .into_iter()
    .map(|(id, b)| CollectionPointCost {
        collection_point_id: id,
        name: b.name,
        trailers: b.trailers,
        parcels: b.parcels,
        total_miles: b.miles,
        total_cost: b.cost,
        avg_cost: ratio(b.cost, b.trailers as f64),
        cost_per_parcel: ratio(b.cost, b.parcels as f64),
    })
    .collect();

    let by_depot = group_by(&selected, |a| (a.depot_id.clone(), a.depot_name.as_str()))
        .into_iter()
        .map(|(id, b)| DepotCost {
            depot_id: id,
            name: b.name,
            trailers: b.trailers,
            parcels: b.parcels,
            total_miles: b.miles,
            total_cost: b.cost,
            cost_per_parcel: ratio(b.cost, b.parcels as f64),
        })
        .collect();

    CostReport {
        filter: filter.clone(),
        summary,
        by_collection_point,
        by_depot,
    }
}

/// Headline figures for `run`.
pub fn overview(run: &AllocationRun) -> RunOverview {
    let points: HashSet<_> = run
        .allocations
        .iter()
        .map(|a| &a.collection_point_id)
        .collect();
    let depots: HashSet<_> = run.allocations.iter().map(|a| &a.depot_id).collect();

    RunOverview {
        active_collection_points: points.len(),
        total_trailers: run.allocations.len(),
        total_parcels: run.total_parcels(),
        depots_used: depots.len(),
        estimated_cost: run.total_cost(),
        unassigned_trailers: run.unassigned.len(),
    }
}
