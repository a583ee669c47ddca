//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing).

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Allocation views
        .route("/allocations", get(handlers::get_allocations))
        .route("/depot-summary", get(handlers::get_depot_summary))
        .route("/costs", get(handlers::get_costs))
        .route("/overview", get(handlers::get_overview))
        // Data entry
        .route("/volumes", post(handlers::import_volumes))
        .route("/overrides", post(handlers::create_override))
        .route("/overrides/{id}", delete(handlers::delete_override))
        .route("/capacity-overrides", post(handlers::create_capacity_override))
        .route(
            "/capacity-overrides/{id}",
            delete(handlers::delete_capacity_override),
        )
        .route(
            "/distances/recalculate",
            post(handlers::recalculate_distances),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
