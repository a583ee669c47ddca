//! In-memory local repository implementation.
//!
//! All data lives in `Vec`s behind a single lock, so insertion order is the
//! listing order. Suitable for unit tests, local development and seeded demo
//! servers.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{
    CapacityOverride, CapacityOverrideId, CollectionPoint, CollectionPointId, CpDepotDistance,
    DailyVolume, Depot, DepotId, ManualOverride, ManualOverrideId,
};

/// In-memory local repository.
///
/// # Example
/// ```
/// use freight_routing::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.depot_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    collection_points: Vec<CollectionPoint>,
    depots: Vec<Depot>,
    distances: Vec<CpDepotDistance>,
    volumes: Vec<DailyVolume>,
    manual_overrides: Vec<ManualOverride>,
    capacity_overrides: Vec<CapacityOverride>,

    // ID counters
    next_manual_id: i64,
    next_capacity_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            collection_points: Vec::new(),
            depots: Vec::new(),
            distances: Vec::new(),
            volumes: Vec::new(),
            manual_overrides: Vec::new(),
            capacity_overrides: Vec::new(),
            next_manual_id: 1,
            next_capacity_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository, keeping the health flag.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    pub fn collection_point_count(&self) -> usize {
        self.data.read().collection_points.len()
    }

    pub fn depot_count(&self) -> usize {
        self.data.read().depots.len()
    }

    pub fn distance_count(&self) -> usize {
        self.data.read().distances.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(
                RepositoryError::connection("Repository is not healthy").with_operation(operation),
            );
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MasterDataRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_collection_points(&self) -> RepositoryResult<Vec<CollectionPoint>> {
        self.check_health("list_collection_points")?;
        Ok(self.data.read().collection_points.clone())
    }

    async fn get_collection_point(
        &self,
        id: &CollectionPointId,
    ) -> RepositoryResult<CollectionPoint> {
        self.check_health("get_collection_point")?;
        self.data
            .read()
            .collection_points
            .iter()
            .find(|cp| &cp.id == id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Collection point {} not found", id),
                    ErrorContext::new("get_collection_point")
                        .with_entity("collection_point")
                        .with_entity_id(id),
                )
            })
    }

    async fn insert_collection_point(&self, point: CollectionPoint) -> RepositoryResult<()> {
        self.check_health("insert_collection_point")?;
        let mut data = self.data.write();
        if data.collection_points.iter().any(|cp| cp.id == point.id) {
            return Err(RepositoryError::conflict_with_context(
                format!("Collection point {} already exists", point.id),
                ErrorContext::new("insert_collection_point")
                    .with_entity("collection_point")
                    .with_entity_id(&point.id),
            ));
        }
        data.collection_points.push(point);
        Ok(())
    }

    async fn list_depots(&self) -> RepositoryResult<Vec<Depot>> {
        self.check_health("list_depots")?;
        Ok(self.data.read().depots.clone())
    }

    async fn get_depot(&self, id: &DepotId) -> RepositoryResult<Depot> {
        self.check_health("get_depot")?;
        self.data
            .read()
            .depots
            .iter()
            .find(|d| &d.id == id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Depot {} not found", id),
                    ErrorContext::new("get_depot")
                        .with_entity("depot")
                        .with_entity_id(id),
                )
            })
    }

    async fn insert_depot(&self, depot: Depot) -> RepositoryResult<()> {
        self.check_health("insert_depot")?;
        let mut data = self.data.write();
        if data.depots.iter().any(|d| d.id == depot.id) {
            return Err(RepositoryError::conflict_with_context(
                format!("Depot {} already exists", depot.id),
                ErrorContext::new("insert_depot")
                    .with_entity("depot")
                    .with_entity_id(&depot.id),
            ));
        }
        data.depots.push(depot);
        Ok(())
    }

    async fn update_depot(&self, depot: Depot) -> RepositoryResult<()> {
        self.check_health("update_depot")?;
        let mut data = self.data.write();
        match data.depots.iter_mut().find(|d| d.id == depot.id) {
            Some(slot) => {
                *slot = depot;
                Ok(())
            }
            None => Err(RepositoryError::not_found_with_context(
                format!("Depot {} not found", depot.id),
                ErrorContext::new("update_depot")
                    .with_entity("depot")
                    .with_entity_id(&depot.id),
            )),
        }
    }
}

#[async_trait]
impl PlanningRepository for LocalRepository {
    async fn list_distances(&self) -> RepositoryResult<Vec<CpDepotDistance>> {
        self.check_health("list_distances")?;
        Ok(self.data.read().distances.clone())
    }

    async fn has_distances(&self) -> RepositoryResult<bool> {
        self.check_health("has_distances")?;
        Ok(!self.data.read().distances.is_empty())
    }

    async fn append_distances(&self, rows: Vec<CpDepotDistance>) -> RepositoryResult<usize> {
        self.check_health("append_distances")?;
        let count = rows.len();
        self.data.write().distances.extend(rows);
        Ok(count)
    }

    async fn replace_distances(&self, rows: Vec<CpDepotDistance>) -> RepositoryResult<usize> {
        self.check_health("replace_distances")?;
        let count = rows.len();
        self.data.write().distances = rows;
        Ok(count)
    }

    async fn list_volumes(&self, date: NaiveDate) -> RepositoryResult<Vec<DailyVolume>> {
        self.check_health("list_volumes")?;
        Ok(self
            .data
            .read()
            .volumes
            .iter()
            .filter(|v| v.date == date)
            .cloned()
            .collect())
    }

    async fn insert_volume(&self, volume: DailyVolume) -> RepositoryResult<()> {
        self.check_health("insert_volume")?;
        let mut data = self.data.write();
        let duplicate = data.volumes.iter().any(|v| {
            v.date == volume.date && v.collection_point_id == volume.collection_point_id
        });
        if duplicate {
            return Err(RepositoryError::conflict_with_context(
                format!(
                    "Volume for {} on {} already exists",
                    volume.collection_point_id, volume.date
                ),
                ErrorContext::new("insert_volume")
                    .with_entity("daily_volume")
                    .with_entity_id(&volume.collection_point_id),
            ));
        }
        data.volumes.push(volume);
        Ok(())
    }

    async fn list_manual_overrides(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<ManualOverride>> {
        self.check_health("list_manual_overrides")?;
        Ok(self
            .data
            .read()
            .manual_overrides
            .iter()
            .filter(|o| o.date == date)
            .cloned()
            .collect())
    }

    async fn insert_manual_override(
        &self,
        mut manual: ManualOverride,
    ) -> RepositoryResult<ManualOverrideId> {
        self.check_health("insert_manual_override")?;
        let mut data = self.data.write();
        let duplicate = data.manual_overrides.iter().any(|o| {
            o.date == manual.date
                && o.collection_point_id == manual.collection_point_id
                && o.trailer_number == manual.trailer_number
                && o.collection_time == manual.collection_time
        });
        if duplicate {
            return Err(RepositoryError::conflict_with_context(
                format!(
                    "Override already exists for {} trailer {} at {} on {}",
                    manual.collection_point_id,
                    manual.trailer_number,
                    manual.collection_time,
                    manual.date
                ),
                ErrorContext::new("insert_manual_override").with_entity("manual_override"),
            ));
        }

        let id = ManualOverrideId::new(data.next_manual_id);
        data.next_manual_id += 1;
        manual.id = Some(id);
        data.manual_overrides.push(manual);
        Ok(id)
    }

    async fn delete_manual_override(&self, id: ManualOverrideId) -> RepositoryResult<()> {
        self.check_health("delete_manual_override")?;
        let mut data = self.data.write();
        let before = data.manual_overrides.len();
        data.manual_overrides.retain(|o| o.id != Some(id));
        if data.manual_overrides.len() == before {
            return Err(RepositoryError::not_found_with_context(
                format!("Manual override {} not found", id),
                ErrorContext::new("delete_manual_override")
                    .with_entity("manual_override")
                    .with_entity_id(id),
            ));
        }
        Ok(())
    }

    async fn list_capacity_overrides(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<CapacityOverride>> {
        self.check_health("list_capacity_overrides")?;
        Ok(self
            .data
            .read()
            .capacity_overrides
            .iter()
            .filter(|o| o.date == date)
            .cloned()
            .collect())
    }

    async fn insert_capacity_override(
        &self,
        mut capacity: CapacityOverride,
    ) -> RepositoryResult<CapacityOverrideId> {
        self.check_health("insert_capacity_override")?;
        let mut data = self.data.write();
        let duplicate = data
            .capacity_overrides
            .iter()
            .any(|o| o.date == capacity.date && o.depot_id == capacity.depot_id);
        if duplicate {
            return Err(RepositoryError::conflict_with_context(
                format!(
                    "Capacity override for {} on {} already exists",
                    capacity.depot_id, capacity.date
                ),
                ErrorContext::new("insert_capacity_override")
                    .with_entity("capacity_override")
                    .with_entity_id(&capacity.depot_id),
            ));
        }

        let id = CapacityOverrideId::new(data.next_capacity_id);
        data.next_capacity_id += 1;
        capacity.id = Some(id);
        data.capacity_overrides.push(capacity);
        Ok(id)
    }

    async fn delete_capacity_override(&self, id: CapacityOverrideId) -> RepositoryResult<()> {
        self.check_health("delete_capacity_override")?;
        let mut data = self.data.write();
        let before = data.capacity_overrides.len();
        data.capacity_overrides.retain(|o| o.id != Some(id));
        if data.capacity_overrides.len() == before {
            return Err(RepositoryError::not_found_with_context(
                format!("Capacity override {} not found", id),
                ErrorContext::new("delete_capacity_override")
                    .with_entity("capacity_override")
                    .with_entity_id(id),
            ));
        }
        Ok(())
    }
}
