//! Allocation run orchestration: load a snapshot, run the engine, roll up.

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::algorithms::{AllocationEngine, FeeSchedule};
use crate::db::checksum::fingerprint;
use crate::db::services::load_planning_snapshot;
use crate::db::{FullRepository, RepositoryError, RepositoryResult};
use crate::models::{AllocationRun, DepotSummary, PlanningSnapshot};

use super::summary::{sort_by_utilisation_desc, summarize};

/// One date's allocation run plus its depot roll-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub run: AllocationRun,
    /// Most utilised depot first.
    pub depot_summary: Vec<DepotSummary>,
}

fn checksum_of<T: Serialize + ?Sized>(value: &T) -> RepositoryResult<String> {
    fingerprint(value).map_err(|e| {
        RepositoryError::internal(format!("Failed to fingerprint allocation run: {}", e))
            .with_operation("plan_snapshot")
    })
}

/// Run the engine over an already loaded snapshot.
pub fn plan_snapshot(snapshot: &PlanningSnapshot, fees: FeeSchedule) -> RepositoryResult<DayPlan> {
    let engine = AllocationEngine::new(snapshot, fees);
    let (mut run, _state) = engine.run();

    run.checksum = checksum_of(&(&run.allocations, &run.unassigned))?;

    let mut depot_summary = summarize(&run.allocations, &snapshot.depots, engine.overrides());
    sort_by_utilisation_desc(&mut depot_summary);

    Ok(DayPlan { run, depot_summary })
}

/// Load the inputs for `date` and plan it.
///
/// Loading is async; the engine itself runs on the blocking pool once every
/// input is in memory.
pub async fn plan_day<R: FullRepository + ?Sized>(
    repo: &R,
    date: NaiveDate,
    fees: FeeSchedule,
) -> RepositoryResult<DayPlan> {
    let snapshot = load_planning_snapshot(repo, date).await?;

    let plan = tokio::task::spawn_blocking(move || plan_snapshot(&snapshot, fees))
        .await
        .map_err(|e| {
            RepositoryError::internal(format!("Allocation task failed: {}", e))
                .with_operation("plan_day")
        })??;

    info!(
        "Planned {}: {} trailers over {} depots, checksum {}",
        date,
        plan.run.allocations.len(),
        plan.depot_summary.len(),
        plan.run.checksum
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CollectionPoint, CpDepotDistance, DailyVolume, Depot, GeoPoint, SortationWindow,
    };

    fn snapshot() -> PlanningSnapshot {
        let date = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        let depot = |id: &str, cap: i64| Depot {
            id: id.into(),
            name: id.into(),
            location: GeoPoint::new(0.0, 0.0),
            daily_capacity: cap,
            window: SortationWindow::default(),
            is_active: true,
        };
        PlanningSnapshot::new(date)
            .with_collection_points([CollectionPoint {
                id: "CP001".into(),
                name: "CP001".into(),
                location: GeoPoint::new(0.0, 0.0),
                is_active: true,
            }])
            .with_depots([depot("D001", 1000), depot("D002", 10_000)])
            .with_distances([
                CpDepotDistance {
                    collection_point_id: "CP001".into(),
                    depot_id: "D001".into(),
                    distance_miles: 5.0,
                    rank: 1,
                },
                CpDepotDistance {
                    collection_point_id: "CP001".into(),
                    depot_id: "D002".into(),
                    distance_miles: 20.0,
                    rank: 2,
                },
            ])
            .with_volumes([DailyVolume {
                date,
                collection_point_id: "CP001".into(),
                parcels: 1800,
                trailers: 2,
                collection_time: Some("06:00".parse().unwrap()),
            }])
    }

    #[test]
    fn test_plan_snapshot_summary_sorted() {
        let plan = plan_snapshot(&snapshot(), FeeSchedule::default()).unwrap();
        let ids: Vec<&str> = plan
            .depot_summary
            .iter()
            .map(|s| s.depot_id.as_str())
            .collect();
        // D001 takes 900 of 1000 (90%), D002 900 of 10000 (9%).
        assert_eq!(ids, vec!["D001", "D002"]);
        assert_eq!(plan.depot_summary[0].utilisation, 90.0);
    }

    #[test]
    fn test_checksum_is_stable() {
        let first = plan_snapshot(&snapshot(), FeeSchedule::default()).unwrap();
        let second = plan_snapshot(&snapshot(), FeeSchedule::default()).unwrap();
        assert_eq!(first.run.checksum.len(), 64);
        assert_eq!(first.run.checksum, second.run.checksum);

        let pricier = plan_snapshot(&snapshot(), FeeSchedule::new(500.0, 1.0, 0.0)).unwrap();
        assert_ne!(first.run.checksum, pricier.run.checksum);
        assert_eq!(
            first.run.checksum,
            fingerprint(&(&first.run.allocations, &first.run.unassigned)).unwrap()
        );
    }

    #[test]
    fn test_unserializable_fingerprint_is_an_error() {
        // JSON object keys must be strings.
        let keyed: std::collections::HashMap<(u8, u8), u8> = [((1, 2), 3)].into();
        let err = checksum_of(&keyed).unwrap_err();
        assert!(matches!(err, RepositoryError::InternalError { .. }));
        assert_eq!(err.context().operation.as_deref(), Some("plan_snapshot"));
    }
}
