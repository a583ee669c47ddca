#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

use freight_routing::db::repositories::LocalRepository;
use freight_routing::db::services;
use freight_routing::models::{CollectionPoint, Depot, GeoPoint, SortationWindow, VolumeRecord};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with the given environment variables set (`Some`) or removed
/// (`None`), restoring the previous values afterwards, even on panic.
/// Calls are serialized because the environment is process-global.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::apply(changes);
    f()
}

struct EnvRestore {
    previous: HashMap<String, Option<String>>,
}

impl EnvRestore {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let previous = changes
            .iter()
            .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
            .collect();
        for (key, value) in changes {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        Self { previous }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain() {
            match value {
                Some(v) => std::env::set_var(&key, v),
                None => std::env::remove_var(&key),
            }
        }
    }
}

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 7).unwrap()
}

pub fn depot(id: &str, lat: f64, lon: f64, capacity: i64) -> Depot {
    Depot {
        id: id.into(),
        name: format!("{id} Hub"),
        location: GeoPoint::new(lat, lon),
        daily_capacity: capacity,
        window: SortationWindow::default(),
        is_active: true,
    }
}

pub fn collection_point(id: &str, lat: f64, lon: f64) -> CollectionPoint {
    CollectionPoint {
        id: id.into(),
        name: format!("{id} Yard"),
        location: GeoPoint::new(lat, lon),
        is_active: true,
    }
}

pub fn volume(cp: &str, parcels: i64, trailers: i32, time: &str) -> VolumeRecord {
    VolumeRecord {
        date: day(),
        collection_point_id: cp.into(),
        parcels,
        trailers,
        collection_time: Some(time.to_string()),
    }
}

/// Three depots across the Midlands and North with two collection points.
///
/// | depot | location    | capacity |
/// |-------|-------------|----------|
/// | D001  | Birmingham  | 2000     |
/// | D002  | Manchester  | 3000     |
/// | D003  | Nottingham  | 10000    |
pub async fn seeded_repository() -> LocalRepository {
    let repo = LocalRepository::new();
    for d in [
        depot("D001", 52.4862, -1.8904, 2000),
        depot("D002", 53.4808, -2.2426, 3000),
        depot("D003", 52.9548, -1.1581, 10_000),
    ] {
        services::register_depot(&repo, d).await.unwrap();
    }
    // Coventry, nearest to Birmingham.
    services::register_collection_point(&repo, collection_point("CP001", 52.4068, -1.5197))
        .await
        .unwrap();
    // Stockport, nearest to Manchester.
    services::register_collection_point(&repo, collection_point("CP002", 53.4106, -2.1575))
        .await
        .unwrap();
    repo
}
