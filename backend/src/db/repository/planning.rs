//! Planning data repository: distances, daily volumes and overrides.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::models::{
    CapacityOverride, CapacityOverrideId, CpDepotDistance, DailyVolume, ManualOverride,
    ManualOverrideId,
};

/// Repository trait for date-scoped planning inputs.
#[async_trait]
pub trait PlanningRepository: Send + Sync {
    // ==================== Distances ====================

    async fn list_distances(&self) -> RepositoryResult<Vec<CpDepotDistance>>;

    async fn has_distances(&self) -> RepositoryResult<bool>;

    /// Append rows to the distance table.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows appended
    async fn append_distances(&self, rows: Vec<CpDepotDistance>) -> RepositoryResult<usize>;

    /// Replace the whole distance table.
    async fn replace_distances(&self, rows: Vec<CpDepotDistance>) -> RepositoryResult<usize>;

    // ==================== Daily volumes ====================

    /// Volume rows for `date` in insertion order.
    async fn list_volumes(&self, date: NaiveDate) -> RepositoryResult<Vec<DailyVolume>>;

    /// # Errors
    /// `Conflict` if a row for the same (date, collection point) exists.
    async fn insert_volume(&self, volume: DailyVolume) -> RepositoryResult<()>;

    // ==================== Overrides ====================

    async fn list_manual_overrides(&self, date: NaiveDate)
        -> RepositoryResult<Vec<ManualOverride>>;

    /// Store an override and return its assigned id.
    ///
    /// # Errors
    /// `Conflict` if an override with the same (date, collection point,
    /// trailer number, collection time) exists.
    async fn insert_manual_override(
        &self,
        manual: ManualOverride,
    ) -> RepositoryResult<ManualOverrideId>;

    /// # Errors
    /// `NotFound` if no override has this id.
    async fn delete_manual_override(&self, id: ManualOverrideId) -> RepositoryResult<()>;

    async fn list_capacity_overrides(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<CapacityOverride>>;

    /// # Errors
    /// `Conflict` if an override for the same (date, depot) exists.
    async fn insert_capacity_override(
        &self,
        capacity: CapacityOverride,
    ) -> RepositoryResult<CapacityOverrideId>;

    async fn delete_capacity_override(&self, id: CapacityOverrideId) -> RepositoryResult<()>;
}
