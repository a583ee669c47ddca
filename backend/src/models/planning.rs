//! Date-scoped planning inputs: daily volumes, precomputed distances and the
//! two kinds of manual override.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::master::{CollectionPointId, DepotId};
use super::time::TimeOfDay;

crate::define_id_type!(i64, ManualOverrideId);
crate::define_id_type!(i64, CapacityOverrideId);

/// Parcel volume expected at one collection point on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub collection_point_id: CollectionPointId,
    pub parcels: u32,
    pub trailers: i32,
    /// `None` means the collection time was never supplied.
    #[serde(default)]
    pub collection_time: Option<TimeOfDay>,
}

impl DailyVolume {
    /// Trailer count used for splitting; non-positive counts become one trailer.
    pub fn effective_trailers(&self) -> u32 {
        self.trailers.max(1) as u32
    }

    pub fn effective_collection_time(&self) -> TimeOfDay {
        self.collection_time.unwrap_or(TimeOfDay::DEFAULT_COLLECTION)
    }

    /// Parcel count for `trailer_number` (1-based). The first
    /// `parcels % trailers` trailers carry one extra parcel.
    pub fn trailer_parcels(&self, trailer_number: u32) -> u32 {
        let trailers = self.effective_trailers();
        let per_trailer = self.parcels / trailers;
        let remainder = self.parcels % trailers;
        per_trailer + u32::from(trailer_number <= remainder)
    }
}

/// Great-circle distance from a collection point to a depot, with the depot's
/// 1-based rank among all depots for that collection point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpDepotDistance {
    pub collection_point_id: CollectionPointId,
    pub depot_id: DepotId,
    pub distance_miles: f64,
    pub rank: u32,
}

/// Forced trailer placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualOverride {
    #[serde(default)]
    pub id: Option<ManualOverrideId>,
    pub date: NaiveDate,
    pub collection_point_id: CollectionPointId,
    pub trailer_number: u32,
    #[serde(default = "default_collection_time")]
    pub collection_time: TimeOfDay,
    pub to_depot_id: DepotId,
}

fn default_collection_time() -> TimeOfDay {
    TimeOfDay::DEFAULT_COLLECTION
}

/// Replacement of a depot's base capacity for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityOverride {
    #[serde(default)]
    pub id: Option<CapacityOverrideId>,
    pub date: NaiveDate,
    pub depot_id: DepotId,
    pub capacity: i64,
    #[serde(default)]
    pub reason: String,
}

/// Raw volume row as submitted for import, before validation.
///
/// `collection_time` accepts `HH:MM`, `HH:MM:SS` or `HHMM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRecord {
    pub date: NaiveDate,
    pub collection_point_id: CollectionPointId,
    pub parcels: i64,
    #[serde(default = "default_trailers")]
    pub trailers: i32,
    #[serde(default)]
    pub collection_time: Option<String>,
}

fn default_trailers() -> i32 {
    1
}

/// Outcome of a batch volume import.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: usize,
    /// Rows whose (date, collection point) already had a volume.
    pub skipped: usize,
    /// One message per rejected row.
    pub errors: Vec<String>,
}
