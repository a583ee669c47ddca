//! JSON seed documents for master data and volumes.
//!
//! ```json
//! {
//!   "depots": [{"id": "D001", "name": "Midlands Hub", "latitude": 52.48,
//!               "longitude": -1.89, "daily_capacity": 2000,
//!               "sortation": {"start": "08:00", "cutoff": "18:00"}}],
//!   "collection_points": [{"id": "CP001", "name": "Leeds",
//!                          "latitude": 53.80, "longitude": -1.55}],
//!   "volumes": [{"date": "2026-01-07", "collection_point_id": "CP001",
//!                "parcels": 5000, "trailers": 3, "collection_time": "09:00"}]
//! }
//! ```

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::db::services::{import_volumes, register_collection_point, register_depot};
use crate::db::FullRepository;
use crate::models::{CollectionPoint, Depot, ImportReport, VolumeRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub depots: Vec<Depot>,
    #[serde(default)]
    pub collection_points: Vec<CollectionPoint>,
    #[serde(default)]
    pub volumes: Vec<VolumeRecord>,
}

/// What [`apply_seed`] stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub depots: usize,
    pub collection_points: usize,
    pub distance_rows: usize,
    pub volumes: ImportReport,
}

/// Read and parse a seed file.
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<SeedData> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))
}

/// Store `seed` in `repo`, then import the volumes.
///
/// Depots go in first so each collection point is ranked against them as it
/// is registered. Points already in `repo` keep their rankings. Any rejected
/// master record aborts the seed; rejected volume rows are only reported.
pub async fn apply_seed<R: FullRepository + ?Sized>(
    repo: &R,
    seed: SeedData,
) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for depot in seed.depots {
        let id = depot.id.clone();
        register_depot(repo, depot)
            .await
            .with_context(|| format!("Failed to seed depot {}", id))?;
        summary.depots += 1;
    }

    for point in seed.collection_points {
        let id = point.id.clone();
        summary.distance_rows += register_collection_point(repo, point)
            .await
            .with_context(|| format!("Failed to seed collection point {}", id))?;
        summary.collection_points += 1;
    }

    if !seed.volumes.is_empty() {
        summary.volumes = import_volumes(repo, seed.volumes)
            .await
            .context("Failed to import seeded volumes")?;
    }

    info!(
        "Seeded {} depots, {} collection points, {} distance rows, {} volume rows",
        summary.depots, summary.collection_points, summary.distance_rows, summary.volumes.imported
    );
    Ok(summary)
}
