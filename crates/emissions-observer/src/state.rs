//! Shared application state for the dashboard API server.
//!
//! [`AppState`] holds the loaded [`EmissionsDataset`]. The dataset never
//! changes after startup, so handlers read it through a plain [`Arc`]
//! with no lock. Per-user selections are not stored here: the browser
//! owns its [`QueryState`](emissions_types::QueryState) and sends it with
//! each request.

use std::sync::Arc;

use emissions_core::EmissionsDataset;
use emissions_types::DashboardMeta;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The immutable dataset every query runs against.
    pub dataset: Arc<EmissionsDataset>,
    /// Attribution line shown under the dashboard.
    pub attribution: String,
}

impl AppState {
    /// Create application state around a loaded dataset.
    pub fn new(dataset: EmissionsDataset, attribution: impl Into<String>) -> Self {
        Self {
            dataset: Arc::new(dataset),
            attribution: attribution.into(),
        }
    }

    /// Page heading, e.g. `World CO2 Emissions from 1950 to 2021`.
    pub fn heading(&self) -> String {
        let years = self.dataset.years();
        format!(
            "{} from {} to {}",
            self.dataset.style().title,
            years.min,
            years.max
        )
    }

    /// Static dataset facts the page needs once at load.
    pub fn meta(&self) -> DashboardMeta {
        let ds = &self.dataset;
        DashboardMeta {
            title: self.heading(),
            years: ds.years(),
            entities: ds.entities().to_vec(),
            default_state: ds.default_state().clone(),
            color_range: ds.color_range(),
            metric: ds.metric().to_owned(),
            unit_label: ds.unit_label().to_owned(),
            attribution: self.attribution.clone(),
        }
    }
}
