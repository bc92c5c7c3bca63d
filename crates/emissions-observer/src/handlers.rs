//! REST API endpoint handlers for the dashboard server.
//!
//! Every handler is a thin shell around a pure engine call on the shared
//! [`EmissionsDataset`](emissions_core::EmissionsDataset). Nothing here
//! keeps per-user state between requests.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | HTML dashboard |
//! | `GET` | `/health` | Liveness probe |
//! | `GET` | `/api/meta` | Year bounds, entity options, default state |
//! | `GET` | `/api/entities` | Dropdown options |
//! | `GET` | `/api/world/{year}` | World total for one year |
//! | `GET` | `/api/view` | View for the default state |
//! | `POST` | `/api/view` | View for a posted state |
//! | `POST` | `/api/recompute` | Apply an event, return new state and view |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use emissions_core::view::format_world_total;
use emissions_core::{apply_event, recompute, world_total_for_year};
use emissions_types::{QueryEvent, QueryState, ViewResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ObserverError;
use crate::page;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/recompute`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecomputeRequest {
    /// The browser's current state.
    pub state: QueryState,
    /// The control change to apply.
    pub event: QueryEvent,
}

/// Response of `POST /api/recompute`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecomputeResponse {
    /// The state after the event.
    pub state: QueryState,
    /// The view for that state.
    pub view: ViewResult,
}

// ---------------------------------------------------------------------------
// GET / -- dashboard page
// ---------------------------------------------------------------------------

/// Serve the single-page dashboard.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ObserverError> {
    Ok(Html(page::render(&state)?))
}

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// GET /api/meta, /api/entities
// ---------------------------------------------------------------------------

/// Return year bounds, entity options, the default state, and the
/// global colour range.
pub async fn get_meta(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.meta())
}

/// List dropdown options in first-appearance order.
pub async fn list_entities(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let entities = state.dataset.entities();
    Json(serde_json::json!({
        "count": entities.len(),
        "entities": entities,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/world/{year}
// ---------------------------------------------------------------------------

/// Return the world aggregate for one year.
///
/// Responds `404` when the world table has no record for the year and
/// `400` when the path segment is not a year.
pub async fn get_world_total(
    State(state): State<Arc<AppState>>,
    year: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ObserverError> {
    let Path(year) = year?;
    let total = world_total_for_year(state.dataset.world(), year)?;
    Ok(Json(serde_json::json!({
        "year": year,
        "total": total,
        "readout": format_world_total(total, state.dataset.unit_label()),
    })))
}

// ---------------------------------------------------------------------------
// /api/view, /api/recompute
// ---------------------------------------------------------------------------

/// Return the view for the default state.
pub async fn get_default_view(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ViewResult>, ObserverError> {
    let query = state.dataset.default_state();
    Ok(Json(recompute(&state.dataset, query)?))
}

/// Return the view for a state posted by the browser.
pub async fn post_view(
    State(state): State<Arc<AppState>>,
    body: Result<Json<QueryState>, JsonRejection>,
) -> Result<Json<ViewResult>, ObserverError> {
    let Json(query) = body?;
    Ok(Json(recompute(&state.dataset, &query)?))
}

/// Apply one control event to the posted state and return the new state
/// together with its view.
pub async fn post_recompute(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RecomputeRequest>, JsonRejection>,
) -> Result<Json<RecomputeResponse>, ObserverError> {
    let Json(request) = body?;
    debug!(event = ?request.event, "Applying dashboard event");
    let next = apply_event(&state.dataset, &request.state, &request.event)?;
    let view = recompute(&state.dataset, &next)?;
    Ok(Json(RecomputeResponse { state: next, view }))
}
