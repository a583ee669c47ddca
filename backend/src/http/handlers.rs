//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer. Allocation runs are recomputed per request from the repository.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AllocationRun, CostQuery, CostReport, CreateCapacityOverrideRequest, CreateOverrideRequest,
    CreatedResponse, DateQuery, DepotSummaryQuery, DepotSummaryResponse, DistanceRefresh,
    HealthResponse, ImportReport, ImportVolumesRequest, RecalculateQuery, RunOverview,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{CapacityOverrideId, ManualOverrideId};
use crate::services::{self, DayPlan};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

async fn plan(state: &AppState, date: chrono::NaiveDate) -> Result<DayPlan, AppError> {
    Ok(services::plan_day(state.repository.as_ref(), date, state.fees).await?)
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Allocation views
// =============================================================================

/// GET /v1/allocations?date=
///
/// Per-trailer allocations, unassigned trailers and the run checksum.
pub async fn get_allocations(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> HandlerResult<AllocationRun> {
    Ok(Json(plan(&state, query.date()).await?.run))
}

/// GET /v1/depot-summary?date=&depot=
pub async fn get_depot_summary(
    State(state): State<AppState>,
    Query(query): Query<DepotSummaryQuery>,
) -> HandlerResult<DepotSummaryResponse> {
    let date = query.date();
    let plan = plan(&state, date).await?;
    let depots = services::filter_depot(plan.depot_summary, query.depot.as_ref());

    Ok(Json(DepotSummaryResponse {
        date,
        total: depots.len(),
        depots,
    }))
}

/// GET /v1/costs?date=&cpid=&depot=
pub async fn get_costs(
    State(state): State<AppState>,
    Query(query): Query<CostQuery>,
) -> HandlerResult<CostReport> {
    let filter = query.filter()?;
    let plan = plan(&state, query.date()).await?;
    Ok(Json(services::cost_report(&plan.run, &filter)))
}

/// GET /v1/overview?date=
pub async fn get_overview(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> HandlerResult<RunOverview> {
    let plan = plan(&state, query.date()).await?;
    Ok(Json(services::overview(&plan.run)))
}

// =============================================================================
// Data entry
// =============================================================================

/// POST /v1/volumes
///
/// Batch import; per-row problems are reported in the body, not as an error.
pub async fn import_volumes(
    State(state): State<AppState>,
    Json(request): Json<ImportVolumesRequest>,
) -> HandlerResult<ImportReport> {
    let report = db_services::import_volumes(state.repository.as_ref(), request.volumes).await?;
    Ok(Json(report))
}

/// POST /v1/overrides
pub async fn create_override(
    State(state): State<AppState>,
    Json(request): Json<CreateOverrideRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id = db_services::add_manual_override(state.repository.as_ref(), request.into()).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: id.value() })))
}

/// DELETE /v1/overrides/{id}
pub async fn delete_override(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_manual_override(state.repository.as_ref(), ManualOverrideId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/capacity-overrides
pub async fn create_capacity_override(
    State(state): State<AppState>,
    Json(request): Json<CreateCapacityOverrideRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let id =
        db_services::add_capacity_override(state.repository.as_ref(), request.into()).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: id.value() })))
}

/// DELETE /v1/capacity-overrides/{id}
pub async fn delete_capacity_override(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_capacity_override(state.repository.as_ref(), CapacityOverrideId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/distances/recalculate?force=
pub async fn recalculate_distances(
    State(state): State<AppState>,
    Query(query): Query<RecalculateQuery>,
) -> HandlerResult<DistanceRefresh> {
    let refresh = db_services::calculate_distances(state.repository.as_ref(), query.force).await?;
    Ok(Json(refresh))
}
