//! Data Transfer Objects for the HTTP API.
//!
//! Query strings and request bodies live here. Responses reuse the model
//! types directly where they already serialize the way clients need.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::models::{
    CapacityOverride, CollectionPointId, CostFilter, DepotId, DepotSummary, ManualOverride,
    TimeOfDay, VolumeRecord,
};

pub use crate::db::services::DistanceRefresh;
pub use crate::models::{AllocationRun, CostReport, ImportReport, RunOverview};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// "connected", "disconnected" or "error: ..."
    pub database: String,
}

/// `?date=YYYY-MM-DD`; today (UTC) when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

impl DateQuery {
    pub fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(today)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepotSummaryQuery {
    pub date: Option<NaiveDate>,
    pub depot: Option<DepotId>,
}

impl DepotSummaryQuery {
    pub fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(today)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CostQuery {
    pub date: Option<NaiveDate>,
    pub cpid: Option<CollectionPointId>,
    pub depot: Option<DepotId>,
}

impl CostQuery {
    pub fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(today)
    }

    /// At most one of `cpid` and `depot` may be given.
    pub fn filter(&self) -> Result<CostFilter, AppError> {
        match (&self.cpid, &self.depot) {
            (None, None) => Ok(CostFilter::All),
            (Some(cp), None) => Ok(CostFilter::CollectionPoint(cp.clone())),
            (None, Some(depot)) => Ok(CostFilter::Depot(depot.clone())),
            (Some(_), Some(_)) => Err(AppError::BadRequest(
                "Filter by either cpid or depot, not both".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecalculateQuery {
    #[serde(default)]
    pub force: bool,
}

/// Depot roll-up for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepotSummaryResponse {
    pub date: NaiveDate,
    pub depots: Vec<DepotSummary>,
    pub total: usize,
}

/// Request body for a batch volume import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportVolumesRequest {
    pub volumes: Vec<VolumeRecord>,
}

/// Request body for a manual trailer override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOverrideRequest {
    pub date: NaiveDate,
    pub collection_point_id: CollectionPointId,
    pub trailer_number: u32,
    /// `HH:MM`; defaults to 09:00.
    #[serde(default)]
    pub collection_time: Option<TimeOfDay>,
    pub to_depot_id: DepotId,
}

impl From<CreateOverrideRequest> for ManualOverride {
    fn from(req: CreateOverrideRequest) -> Self {
        ManualOverride {
            id: None,
            date: req.date,
            collection_point_id: req.collection_point_id,
            trailer_number: req.trailer_number,
            collection_time: req.collection_time.unwrap_or(TimeOfDay::DEFAULT_COLLECTION),
            to_depot_id: req.to_depot_id,
        }
    }
}

/// Request body for a depot capacity override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCapacityOverrideRequest {
    pub date: NaiveDate,
    pub depot_id: DepotId,
    pub capacity: i64,
    #[serde(default)]
    pub reason: String,
}

impl From<CreateCapacityOverrideRequest> for CapacityOverride {
    fn from(req: CreateCapacityOverrideRequest) -> Self {
        CapacityOverride {
            id: None,
            date: req.date,
            depot_id: req.depot_id,
            capacity: req.capacity,
            reason: req.reason,
        }
    }
}

/// Id assigned to a newly stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}
