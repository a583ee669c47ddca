//! Cost and overview reports derived from an allocation run.

use serde::{Deserialize, Serialize};

use super::master::{CollectionPointId, DepotId};

/// Restricts a cost report to one collection point or one depot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum CostFilter {
    #[default]
    All,
    CollectionPoint(CollectionPointId),
    Depot(DepotId),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostTotals {
    pub total_cost: f64,
    pub total_miles: f64,
    pub total_trailers: usize,
    pub total_parcels: u64,
    pub avg_cost_per_trailer: f64,
    pub cost_per_parcel: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionPointCost {
    pub collection_point_id: CollectionPointId,
    pub name: String,
    pub trailers: usize,
    pub parcels: u64,
    pub total_miles: f64,
    pub total_cost: f64,
    pub avg_cost: f64,
    pub cost_per_parcel: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepotCost {
    pub depot_id: DepotId,
    pub name: String,
    pub trailers: usize,
    pub parcels: u64,
    pub total_miles: f64,
    pub total_cost: f64,
    pub cost_per_parcel: f64,
}

/// Expected transport cost for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub filter: CostFilter,
    pub summary: CostTotals,
    pub by_collection_point: Vec<CollectionPointCost>,
    pub by_depot: Vec<DepotCost>,
}

/// Headline figures for a run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunOverview {
    pub active_collection_points: usize,
    pub total_trailers: usize,
    pub total_parcels: u64,
    pub depots_used: usize,
    pub estimated_cost: f64,
    pub unassigned_trailers: usize,
}
