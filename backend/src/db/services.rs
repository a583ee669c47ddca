//! High-level database service layer.
//!
//! Repository-agnostic operations holding the data-entry rules: duplicate
//! and reference checks, lenient volume import, distance precomputation and
//! snapshot loading for the allocation engine.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, seed loader)              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Input validation                                     │
//! │  - Distance ranking on registration                     │
//! │  - Planning snapshot assembly                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!           ┌─────────▼───────────┐
//!           │ Local Repository    │
//!           │ (in-memory)         │
//!           └─────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use freight_routing::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let refresh = services::calculate_distances(&repo, false).await?;
//!     println!("{} distance rows", refresh.rows);
//!     Ok(())
//! }
//! ```

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::repository::{
    ErrorContext, FullRepository, MasterDataRepository, PlanningRepository, RepositoryError,
    RepositoryResult,
};
use crate::algorithms::distance::{rank_all, rank_depots};
use crate::models::{
    CapacityOverride, CapacityOverrideId, CollectionPoint, CollectionPointId, DailyVolume, Depot,
    DepotId, ImportReport, ManualOverride, ManualOverrideId, PlanningSnapshot, SortationWindow,
    TimeOfDay, VolumeRecord,
};

fn invalid(operation: &str, entity: &str, id: impl ToString, message: String) -> RepositoryError {
    RepositoryError::validation_with_context(
        message,
        ErrorContext::new(operation)
            .with_entity(entity)
            .with_entity_id(id),
    )
}

/// Map a missing referenced record onto a validation failure of the caller's input.
fn reference_error(operation: &str, err: RepositoryError) -> RepositoryError {
    match err {
        RepositoryError::NotFound { message, context } => {
            RepositoryError::validation_with_context(
                message,
                ErrorContext {
                    operation: Some(operation.to_string()),
                    ..context
                },
            )
        }
        other => other,
    }
}

// ==================== Health & Connection ====================

/// Check if the repository is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Master data ====================

/// Register a collection point and append its rankings to every active depot.
///
/// # Returns
/// * `Ok(usize)` - Number of distance rows appended
/// * `Err(Conflict)` if the id is taken
pub async fn register_collection_point<R: FullRepository + ?Sized>(
    repo: &R,
    point: CollectionPoint,
) -> RepositoryResult<usize> {
    if point.id.as_str().is_empty() {
        return Err(invalid(
            "register_collection_point",
            "collection_point",
            &point.id,
            "Collection point id must not be empty".to_string(),
        ));
    }

    let depots = repo.list_depots().await?;
    let ranking = rank_depots(&point, &depots);
    let id = point.id.clone();

    repo.insert_collection_point(point).await?;
    let appended = repo.append_distances(ranking).await?;
    info!(
        "Service layer: registered collection point {} with {} ranked depots",
        id, appended
    );
    Ok(appended)
}

/// Register a depot.
///
/// Existing rankings are not touched; run [`calculate_distances`] with
/// `force` to rank the new depot.
pub async fn register_depot<R: FullRepository + ?Sized>(
    repo: &R,
    depot: Depot,
) -> RepositoryResult<()> {
    if depot.id.as_str().is_empty() {
        return Err(invalid(
            "register_depot",
            "depot",
            &depot.id,
            "Depot id must not be empty".to_string(),
        ));
    }
    if depot.daily_capacity < 0 {
        return Err(invalid(
            "register_depot",
            "depot",
            &depot.id,
            format!("Daily capacity must be non-negative, got {}", depot.daily_capacity),
        ));
    }
    if depot.window.is_degenerate() {
        warn!(
            "Service layer: depot {} cutoff {} is not after start {}",
            depot.id, depot.window.cutoff, depot.window.start
        );
    }

    let id = depot.id.clone();
    repo.insert_depot(depot).await?;
    info!("Service layer: registered depot {}", id);
    Ok(())
}

/// Replace a depot's sortation window. Both times must be strict `HH:MM`.
pub async fn update_depot_window<R: FullRepository + ?Sized>(
    repo: &R,
    depot_id: &DepotId,
    start: &str,
    cutoff: &str,
) -> RepositoryResult<Depot> {
    let parse = |raw: &str| {
        raw.parse::<TimeOfDay>().map_err(|e| {
            invalid("update_depot_window", "depot", depot_id, e.to_string())
        })
    };
    let window = SortationWindow::new(parse(start)?, parse(cutoff)?);

    let mut depot = repo.get_depot(depot_id).await?;
    depot.window = window;
    repo.update_depot(depot.clone()).await?;
    info!(
        "Service layer: depot {} sortation window now {}-{}",
        depot_id, window.start, window.cutoff
    );
    Ok(depot)
}

/// Replace a depot's base daily capacity.
pub async fn update_depot_capacity<R: FullRepository + ?Sized>(
    repo: &R,
    depot_id: &DepotId,
    capacity: i64,
) -> RepositoryResult<Depot> {
    if capacity < 0 {
        return Err(invalid(
            "update_depot_capacity",
            "depot",
            depot_id,
            format!("Daily capacity must be non-negative, got {}", capacity),
        ));
    }

    let mut depot = repo.get_depot(depot_id).await?;
    depot.daily_capacity = capacity;
    repo.update_depot(depot.clone()).await?;
    info!("Service layer: depot {} capacity now {}", depot_id, capacity);
    Ok(depot)
}

// ==================== Distances ====================

/// Result of a distance precomputation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceRefresh {
    /// Rows written, or rows already present when skipped.
    pub rows: usize,
    pub skipped: bool,
}

/// Rank every active depot for every collection point.
///
/// Does nothing if distance rows already exist, unless `force` is set, in
/// which case the whole table is replaced.
pub async fn calculate_distances<R: FullRepository + ?Sized>(
    repo: &R,
    force: bool,
) -> RepositoryResult<DistanceRefresh> {
    if !force && repo.has_distances().await? {
        let rows = repo.list_distances().await?.len();
        info!(
            "Service layer: {} distance rows already present, skipping recalculation",
            rows
        );
        return Ok(DistanceRefresh {
            rows,
            skipped: true,
        });
    }

    let points = repo.list_collection_points().await?;
    let depots = repo.list_depots().await?;
    let rows = repo.replace_distances(rank_all(&points, &depots)).await?;
    info!(
        "Service layer: ranked {} collection points against {} depots ({} rows)",
        points.len(),
        depots.iter().filter(|d| d.is_active).count(),
        rows
    );
    Ok(DistanceRefresh {
        rows,
        skipped: false,
    })
}

// ==================== Volumes ====================

fn validate_volume(
    record: &VolumeRecord,
    known_points: &HashSet<CollectionPointId>,
) -> Result<DailyVolume, String> {
    if !known_points.contains(&record.collection_point_id) {
        return Err(format!(
            "{} on {}: unknown collection point",
            record.collection_point_id, record.date
        ));
    }
    let parcels = u32::try_from(record.parcels).map_err(|_| {
        format!(
            "{} on {}: parcels must be between 0 and {}, got {}",
            record.collection_point_id,
            record.date,
            u32::MAX,
            record.parcels
        )
    })?;
    let collection_time = record
        .collection_time
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(TimeOfDay::parse_lenient)
        .transpose()
        .map_err(|e| format!("{} on {}: {}", record.collection_point_id, record.date, e))?;

    Ok(DailyVolume {
        date: record.date,
        collection_point_id: record.collection_point_id.clone(),
        parcels,
        trailers: record.trailers,
        collection_time,
    })
}

/// Import a batch of volume rows.
///
/// Rows for unknown collection points or with invalid values are rejected and
/// reported; rows whose (date, collection point) already has a volume are
/// skipped. Only repository failures abort the batch.
pub async fn import_volumes<R: FullRepository + ?Sized>(
    repo: &R,
    records: Vec<VolumeRecord>,
) -> RepositoryResult<ImportReport> {
    let known_points: HashSet<CollectionPointId> = repo
        .list_collection_points()
        .await?
        .into_iter()
        .map(|cp| cp.id)
        .collect();

    let mut report = ImportReport::default();
    for record in &records {
        let volume = match validate_volume(record, &known_points) {
            Ok(volume) => volume,
            Err(message) => {
                warn!("Service layer: rejected volume row: {}", message);
                report.errors.push(message);
                continue;
            }
        };

        match repo.insert_volume(volume).await {
            Ok(()) => report.imported += 1,
            Err(RepositoryError::Conflict { .. }) => report.skipped += 1,
            Err(e) => return Err(e.with_operation("import_volumes")),
        }
    }

    info!(
        "Service layer: volume import finished: {} imported, {} skipped, {} rejected",
        report.imported,
        report.skipped,
        report.errors.len()
    );
    Ok(report)
}

// ==================== Overrides ====================

/// Store a manual trailer override after checking its references.
pub async fn add_manual_override<R: FullRepository + ?Sized>(
    repo: &R,
    manual: ManualOverride,
) -> RepositoryResult<ManualOverrideId> {
    const OP: &str = "add_manual_override";
    if manual.trailer_number < 1 {
        return Err(invalid(
            OP,
            "manual_override",
            &manual.collection_point_id,
            "Trailer number must be at least 1".to_string(),
        ));
    }
    repo.get_collection_point(&manual.collection_point_id)
        .await
        .map_err(|e| reference_error(OP, e))?;
    repo.get_depot(&manual.to_depot_id)
        .await
        .map_err(|e| reference_error(OP, e))?;

    let summary = format!(
        "{} trailer {} at {} on {} -> {}",
        manual.collection_point_id,
        manual.trailer_number,
        manual.collection_time,
        manual.date,
        manual.to_depot_id
    );
    let id = repo.insert_manual_override(manual).await?;
    info!("Service layer: manual override {} stored: {}", id, summary);
    Ok(id)
}

pub async fn delete_manual_override<R: FullRepository + ?Sized>(
    repo: &R,
    id: ManualOverrideId,
) -> RepositoryResult<()> {
    repo.delete_manual_override(id).await?;
    info!("Service layer: manual override {} deleted", id);
    Ok(())
}

/// Store a capacity override after checking the depot and the value.
pub async fn add_capacity_override<R: FullRepository + ?Sized>(
    repo: &R,
    capacity: CapacityOverride,
) -> RepositoryResult<CapacityOverrideId> {
    const OP: &str = "add_capacity_override";
    if capacity.capacity < 0 {
        return Err(invalid(
            OP,
            "capacity_override",
            &capacity.depot_id,
            format!("Capacity must be non-negative, got {}", capacity.capacity),
        ));
    }
    repo.get_depot(&capacity.depot_id)
        .await
        .map_err(|e| reference_error(OP, e))?;

    let summary = format!(
        "{} on {} = {}",
        capacity.depot_id, capacity.date, capacity.capacity
    );
    let id = repo.insert_capacity_override(capacity).await?;
    info!("Service layer: capacity override {} stored: {}", id, summary);
    Ok(id)
}

pub async fn delete_capacity_override<R: FullRepository + ?Sized>(
    repo: &R,
    id: CapacityOverrideId,
) -> RepositoryResult<()> {
    repo.delete_capacity_override(id).await?;
    info!("Service layer: capacity override {} deleted", id);
    Ok(())
}

// ==================== Planning snapshot ====================

/// Load everything an allocation run for `date` reads.
pub async fn load_planning_snapshot<R: FullRepository + ?Sized>(
    repo: &R,
    date: NaiveDate,
) -> RepositoryResult<PlanningSnapshot> {
    let snapshot = PlanningSnapshot::new(date)
        .with_collection_points(repo.list_collection_points().await?)
        .with_depots(repo.list_depots().await?)
        .with_distances(repo.list_distances().await?)
        .with_volumes(repo.list_volumes(date).await?)
        .with_manual_overrides(repo.list_manual_overrides(date).await?)
        .with_capacity_overrides(repo.list_capacity_overrides(date).await?);

    info!(
        "Service layer: loaded snapshot for {}: {} volumes, {} active depots, {} overrides",
        date,
        snapshot.volumes.len(),
        snapshot.depots.len(),
        snapshot.manual_overrides.len() + snapshot.capacity_overrides.len()
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::models::GeoPoint;

    #[test]
    fn test_validate_volume_rules() {
        let known: HashSet<CollectionPointId> = [CollectionPointId::new("CP001")].into();
        let date = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        let record = |cp: &str, parcels: i64, time: Option<&str>| VolumeRecord {
            date,
            collection_point_id: cp.into(),
            parcels,
            trailers: 2,
            collection_time: time.map(str::to_string),
        };

        let ok = validate_volume(&record("CP001", 100, Some("0930")), &known).unwrap();
        assert_eq!(ok.collection_time.map(|t| t.to_string()).as_deref(), Some("09:30"));
        let blank = validate_volume(&record("CP001", 1, Some("")), &known).unwrap();
        assert_eq!(blank.collection_time, None);

        assert!(validate_volume(&record("CP999", 100, None), &known).is_err());
        assert!(validate_volume(&record("CP001", -1, None), &known).is_err());
        assert!(validate_volume(&record("CP001", 1, Some("9h30")), &known).is_err());
    }

    #[tokio::test]
    async fn test_reference_error_becomes_validation() {
        let repo = LocalRepository::new();
        repo.insert_depot(Depot {
            id: "D001".into(),
            name: "D001".into(),
            location: GeoPoint::new(52.0, -1.0),
            daily_capacity: 100,
            window: SortationWindow::default(),
            is_active: true,
        })
        .await
        .unwrap();

        let err = add_manual_override(
            &repo,
            ManualOverride {
                id: None,
                date: NaiveDate::from_ymd_opt(2026, 1, 7).unwrap(),
                collection_point_id: "CP404".into(),
                trailer_number: 1,
                collection_time: TimeOfDay::DEFAULT_COLLECTION,
                to_depot_id: "D001".into(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert_eq!(err.context().operation.as_deref(), Some("add_manual_override"));
        assert_eq!(err.context().entity.as_deref(), Some("collection_point"));
    }
}
