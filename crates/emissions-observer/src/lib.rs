//! Dashboard API server for the emissions query engine.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **HTML dashboard** (`GET /`) with a year slider, a multi-select
//!   country list, a world total readout, a choropleth map, and a bar
//!   chart
//! - **REST endpoints** for dataset metadata, world totals, and full view
//!   recomputation
//!
//! # Architecture
//!
//! The server is the UI collaborator of the engine. The browser owns the
//! current [`QueryState`](emissions_types::QueryState) and posts it with
//! each control event; the handler calls the engine's pure
//! `apply_event` and `recompute` against the shared, immutable
//! [`EmissionsDataset`](emissions_core::EmissionsDataset) and returns the
//! new state and view. No per-user state lives on the server.

pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
