//! In-memory snapshot of every input an allocation run reads.
//!
//! The service layer fills a [`PlanningSnapshot`] from the repository before the
//! allocation loop starts, so the loop itself never performs I/O.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::master::{CollectionPoint, CollectionPointId, Depot};
use super::planning::{CapacityOverride, CpDepotDistance, DailyVolume, ManualOverride};

#[derive(Debug, Clone)]
pub struct PlanningSnapshot {
    pub date: NaiveDate,
    pub collection_points: HashMap<CollectionPointId, CollectionPoint>,
    /// Active depots in repository order.
    pub depots: Vec<Depot>,
    /// Ranked distances per collection point, ascending by rank.
    pub distances: HashMap<CollectionPointId, Vec<CpDepotDistance>>,
    /// Volume rows for `date` in repository order.
    pub volumes: Vec<DailyVolume>,
    pub manual_overrides: Vec<ManualOverride>,
    pub capacity_overrides: Vec<CapacityOverride>,
}

impl PlanningSnapshot {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            collection_points: HashMap::new(),
            depots: Vec::new(),
            distances: HashMap::new(),
            volumes: Vec::new(),
            manual_overrides: Vec::new(),
            capacity_overrides: Vec::new(),
        }
    }

    pub fn with_collection_points(mut self, points: impl IntoIterator<Item = CollectionPoint>) -> Self {
        self.collection_points = points.into_iter().map(|cp| (cp.id.clone(), cp)).collect();
        self
    }

    /// Keeps active depots only.
    pub fn with_depots(mut self, depots: impl IntoIterator<Item = Depot>) -> Self {
        self.depots = depots.into_iter().filter(|d| d.is_active).collect();
        self
    }

    /// Groups rows per collection point and orders each group by rank.
    pub fn with_distances(mut self, rows: impl IntoIterator<Item = CpDepotDistance>) -> Self {
        let mut grouped: HashMap<CollectionPointId, Vec<CpDepotDistance>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.collection_point_id.clone())
                .or_default()
                .push(row);
        }
        for ranking in grouped.values_mut() {
            ranking.sort_by_key(|r| r.rank);
        }
        self.distances = grouped;
        self
    }

    /// Keeps rows for the snapshot date only.
    pub fn with_volumes(mut self, volumes: impl IntoIterator<Item = DailyVolume>) -> Self {
        let date = self.date;
        self.volumes = volumes.into_iter().filter(|v| v.date == date).collect();
        self
    }

    pub fn with_manual_overrides(mut self, overrides: impl IntoIterator<Item = ManualOverride>) -> Self {
        self.manual_overrides = overrides.into_iter().collect();
        self
    }

    pub fn with_capacity_overrides(
        mut self,
        overrides: impl IntoIterator<Item = CapacityOverride>,
    ) -> Self {
        self.capacity_overrides = overrides.into_iter().collect();
        self
    }

    pub fn ranking(&self, id: &CollectionPointId) -> &[CpDepotDistance] {
        self.distances.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}
