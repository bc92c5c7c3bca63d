//! Core data structs for the emissions dashboard.
//!
//! Covers the loaded [`EmissionsRecord`], the user-controlled
//! [`QueryState`], and the [`ViewResult`] recomputed from them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::figures::{BarChartSpec, ChoroplethSpec};

// ---------------------------------------------------------------------------
// Source data
// ---------------------------------------------------------------------------

/// One row of an emissions table: an entity's emissions for one year.
///
/// Records are immutable once loaded. Aggregates such as continents or
/// income groups carry no `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EmissionsRecord {
    /// Country or region name as it appears in the source data.
    pub entity: String,
    /// ISO-style country code, absent for aggregates.
    pub code: Option<String>,
    /// Calendar year.
    pub year: i32,
    /// Annual CO2 emissions in tonnes.
    pub annual_emissions: f64,
}

/// Inclusive minimum and maximum of the emissions metric.
///
/// Used to normalise the choropleth colour scale. Computed once over the
/// whole all-entities table so colours mean the same thing in every year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ColorRange {
    /// Smallest metric value.
    pub min: f64,
    /// Largest metric value.
    pub max: f64,
}

impl ColorRange {
    /// Width of the range. Zero when every value is identical.
    pub const fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Inclusive year range selectable on the dashboard slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct YearBounds {
    /// First selectable year.
    pub min: i32,
    /// Last selectable year.
    pub max: i32,
}

impl YearBounds {
    /// Whether `year` lies within the bounds.
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }

    /// Iterate every year in the bounds, ascending.
    pub const fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.min..=self.max
    }
}

// ---------------------------------------------------------------------------
// Query state
// ---------------------------------------------------------------------------

/// The user's current selection: one year and a set of entities.
///
/// Only changed by explicit user events. The engine never mutates a state
/// in place; transitions return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QueryState {
    /// The year shown on the slider.
    pub selected_year: i32,
    /// Entities chosen in the dropdown.
    pub selected_entities: BTreeSet<String>,
}

impl QueryState {
    /// Build a state from a year and any collection of entity names.
    pub fn new<I, S>(selected_year: i32, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_year,
            selected_entities: entities.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// View result
// ---------------------------------------------------------------------------

/// Everything the dashboard renders for one [`QueryState`].
///
/// Rebuilt from scratch on every state change. It has no identity of its
/// own and is never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ViewResult {
    /// The year this view was computed for.
    pub year: i32,
    /// World aggregate emissions for the year, if the world table has it.
    pub world_total_for_year: Option<f64>,
    /// Human-readable world total, e.g. `"37123850000 tonnes"`, or a
    /// placeholder when the total is missing.
    pub world_total_readout: String,
    /// Rows of the selected entities for the year, in source order.
    pub filtered_rows: Vec<EmissionsRecord>,
    /// Map figure for the year.
    pub choropleth: ChoroplethSpec,
    /// Bar figure for the selected entities.
    pub bar_chart: BarChartSpec,
}

/// Static facts about the loaded dataset that the dashboard needs once
/// at page load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DashboardMeta {
    /// Page heading.
    pub title: String,
    /// Slider bounds.
    pub years: YearBounds,
    /// Dropdown options, in first-appearance order.
    pub entities: Vec<String>,
    /// State the page starts in.
    pub default_state: QueryState,
    /// Global colour normalisation range.
    pub color_range: ColorRange,
    /// Name of the emissions metric column.
    pub metric: String,
    /// Unit shown next to the world total.
    pub unit_label: String,
    /// Data source attribution line.
    pub attribution: String,
}
