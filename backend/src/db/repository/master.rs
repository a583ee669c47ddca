//! Master data repository: collection points and depots.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{CollectionPoint, CollectionPointId, Depot, DepotId};

/// Repository trait for collection point and depot records.
///
/// Listing methods return records in insertion order; the allocation engine
/// relies on depot order for tie-breaking and summary ordering.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait MasterDataRepository: Send + Sync {
    /// Check if the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    async fn list_collection_points(&self) -> RepositoryResult<Vec<CollectionPoint>>;

    /// # Errors
    /// `NotFound` if no collection point has this id.
    async fn get_collection_point(&self, id: &CollectionPointId)
        -> RepositoryResult<CollectionPoint>;

    /// # Errors
    /// `Conflict` if the id is already taken.
    async fn insert_collection_point(&self, point: CollectionPoint) -> RepositoryResult<()>;

    async fn list_depots(&self) -> RepositoryResult<Vec<Depot>>;

    /// # Errors
    /// `NotFound` if no depot has this id.
    async fn get_depot(&self, id: &DepotId) -> RepositoryResult<Depot>;

    /// # Errors
    /// `Conflict` if the id is already taken.
    async fn insert_depot(&self, depot: Depot) -> RepositoryResult<()>;

    /// Replace an existing depot record, keeping its position.
    ///
    /// # Errors
    /// `NotFound` if no depot has this id.
    async fn update_depot(&self, depot: Depot) -> RepositoryResult<()>;
}
