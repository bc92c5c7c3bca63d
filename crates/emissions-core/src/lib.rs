//! Emissions query engine for the CO2 dashboard.
//!
//! This crate owns the in-memory emissions tables and answers every
//! question the dashboard asks of them. It has no I/O beyond the one-time
//! CSV load and no shared mutable state: an [`EmissionsDataset`] is built
//! once and then passed by reference into pure functions.
//!
//! # Modules
//!
//! - [`dataset`] -- CSV parsing into [`EmissionsTable`]s and the derived,
//!   immutable [`EmissionsDataset`].
//! - [`query`] -- Global colour bounds, year/entity filtering, world totals.
//! - [`color`] -- Sequential colour scales and value-to-colour mapping.
//! - [`figure`] -- Choropleth and bar chart construction.
//! - [`view`] -- Pure state transitions and full view recomputation.
//! - [`config`] -- YAML configuration with environment overrides.
//! - [`error`] -- Load and query error types.
//!
//! # Data flow
//!
//! ```text
//! UI event --> apply_event(dataset, state, event) --> new QueryState
//!          --> recompute(dataset, state)          --> ViewResult
//! ```

pub mod color;
pub mod config;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod query;
pub mod view;

// Re-export primary types at crate root.
pub use config::{ConfigError, DashboardConfig};
pub use dataset::{
    DatasetOptions, EmissionsDataset, EmissionsTable, load_from_paths, load_from_readers,
};
pub use error::{DataLoadError, QueryError};
pub use figure::{ChoroplethStyle, build_bar_chart, build_choropleth};
pub use query::{
    distinct_entities, filter_by_year_and_entities, global_bounds, world_total_for_year,
};
pub use view::{apply_event, default_state, recompute, validate_state};
