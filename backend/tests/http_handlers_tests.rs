//! Handler-level tests: each handler is called directly with its extractors.

#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use freight_routing::http::dto::{
    CostQuery, CreateCapacityOverrideRequest, CreateOverrideRequest, DateQuery,
    DepotSummaryQuery, ImportVolumesRequest, RecalculateQuery,
};
use freight_routing::http::handlers;
use freight_routing::http::AppState;
use freight_routing::models::CostFilter;
use support::{day, seeded_repository, volume};

async fn state_with_volumes() -> AppState {
    let repo = seeded_repository().await;
    let state = AppState::new(Arc::new(repo));
    let Json(report) = handlers::import_volumes(
        State(state.clone()),
        Json(ImportVolumesRequest {
            volumes: vec![volume("CP001", 5000, 3, "06:00"), volume("CP002", 1200, 1, "09:00")],
        }),
    )
    .await
    .unwrap();
    assert_eq!(report.imported, 2);
    state
}

fn on_day() -> DateQuery {
    DateQuery { date: Some(day()) }
}

#[tokio::test]
async fn test_health() {
    let state = AppState::new(Arc::new(seeded_repository().await));
    let Json(health) = handlers::health_check(State(state)).await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.database, "connected");
}

#[tokio::test]
async fn test_allocations_and_overview() {
    let state = state_with_volumes().await;

    let Json(run) = handlers::get_allocations(State(state.clone()), Query(on_day()))
        .await
        .unwrap();
    assert_eq!(run.allocations.len(), 4);
    assert_eq!(run.checksum.len(), 64);

    let Json(overview) = handlers::get_overview(State(state), Query(on_day()))
        .await
        .unwrap();
    assert_eq!(overview.active_collection_points, 2);
    assert_eq!(overview.total_trailers, 4);
    assert_eq!(overview.total_parcels, 6200);
    assert_eq!(overview.depots_used, 3);
    assert_eq!(overview.unassigned_trailers, 0);
}

#[tokio::test]
async fn test_depot_summary_filter() {
    let state = state_with_volumes().await;

    let Json(all) = handlers::get_depot_summary(
        State(state.clone()),
        Query(DepotSummaryQuery {
            date: Some(day()),
            depot: None,
        }),
    )
    .await
    .unwrap();
    assert_eq!(all.total, 3);
    assert!(all
        .depots
        .windows(2)
        .all(|pair| pair[0].utilisation >= pair[1].utilisation));

    let Json(one) = handlers::get_depot_summary(
        State(state),
        Query(DepotSummaryQuery {
            date: Some(day()),
            depot: Some("D002".into()),
        }),
    )
    .await
    .unwrap();
    assert_eq!(one.total, 1);
    assert_eq!(one.depots[0].allocated_parcels, 1200);
}

#[tokio::test]
async fn test_costs() {
    let state = state_with_volumes().await;

    let Json(report) = handlers::get_costs(
        State(state.clone()),
        Query(CostQuery {
            date: Some(day()),
            cpid: Some("CP002".into()),
            depot: None,
        }),
    )
    .await
    .unwrap();
    assert_eq!(report.filter, CostFilter::CollectionPoint("CP002".into()));
    assert_eq!(report.summary.total_trailers, 1);
    assert_eq!(report.summary.total_cost, 200.0);

    let err = handlers::get_costs(
        State(state),
        Query(CostQuery {
            date: Some(day()),
            cpid: Some("CP002".into()),
            depot: Some("D002".into()),
        }),
    )
    .await
    .err()
    .expect("conflicting filters are rejected");
    assert_eq!(err.to_parts().0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_override_endpoints() {
    let state = state_with_volumes().await;

    let (status, Json(created)) = handlers::create_override(
        State(state.clone()),
        Json(CreateOverrideRequest {
            date: day(),
            collection_point_id: "CP001".into(),
            trailer_number: 1,
            collection_time: Some("06:00".parse().unwrap()),
            to_depot_id: "D002".into(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let Json(run) = handlers::get_allocations(State(state.clone()), Query(on_day()))
        .await
        .unwrap();
    let first = &run.allocations[0];
    assert_eq!(first.depot_id.as_str(), "D002");
    assert!(first.is_override);

    let status = handlers::delete_override(State(state.clone()), Path(created.id))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
    let err = handlers::delete_override(State(state.clone()), Path(created.id))
        .await
        .err()
        .expect("second delete misses");
    assert_eq!(err.to_parts().0, StatusCode::NOT_FOUND);

    let err = handlers::create_override(
        State(state),
        Json(CreateOverrideRequest {
            date: day(),
            collection_point_id: "CP404".into(),
            trailer_number: 1,
            collection_time: None,
            to_depot_id: "D002".into(),
        }),
    )
    .await
    .err()
    .expect("unknown collection point");
    let (status, body) = err.to_parts();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_capacity_override_endpoints() {
    let state = state_with_volumes().await;

    let (status, Json(created)) = handlers::create_capacity_override(
        State(state.clone()),
        Json(CreateCapacityOverrideRequest {
            date: day(),
            depot_id: "D002".into(),
            capacity: 0,
            reason: "closed".into(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let Json(run) = handlers::get_allocations(State(state.clone()), Query(on_day()))
        .await
        .unwrap();
    assert!(run.allocations.iter().all(|a| a.depot_id.as_str() != "D002"));

    let status = handlers::delete_capacity_override(State(state), Path(created.id))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_recalculate_distances() {
    let state = state_with_volumes().await;

    let Json(skipped) = handlers::recalculate_distances(
        State(state.clone()),
        Query(RecalculateQuery { force: false }),
    )
    .await
    .unwrap();
    assert!(skipped.skipped);

    let Json(forced) =
        handlers::recalculate_distances(State(state), Query(RecalculateQuery { force: true }))
            .await
            .unwrap();
    assert!(!forced.skipped);
    assert_eq!(forced.rows, 6);
}
