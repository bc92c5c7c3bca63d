//! Axum router construction for the dashboard API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so a separately hosted front end can call the API.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the dashboard server.
///
/// The router includes:
/// - `GET /` -- HTML dashboard
/// - `GET /health` -- liveness probe
/// - `GET /api/meta` -- dataset facts for page setup
/// - `GET /api/entities` -- dropdown options
/// - `GET /api/world/{year}` -- world total for a year
/// - `GET|POST /api/view` -- view for the default or a posted state
/// - `POST /api/recompute` -- apply an event and return the new view
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard page
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        // REST API
        .route("/api/meta", get(handlers::get_meta))
        .route("/api/entities", get(handlers::list_entities))
        .route("/api/world/{year}", get(handlers::get_world_total))
        .route(
            "/api/view",
            get(handlers::get_default_view).post(handlers::post_view),
        )
        .route("/api/recompute", post(handlers::post_recompute))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
