//! Renderable figure descriptions.
//!
//! These structs describe a chart completely, including the settings a
//! charting library would otherwise fill in with its own defaults (colour
//! scale, projection, margins). The browser dashboard draws them as-is,
//! and tests can check them without rendering anything.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::SequentialScale;
use crate::structs::ColorRange;

// ---------------------------------------------------------------------------
// Choropleth
// ---------------------------------------------------------------------------

/// Outer figure margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Margin {
    /// Right margin.
    pub r: u32,
    /// Top margin.
    pub t: u32,
    /// Bottom margin.
    pub b: u32,
    /// Left margin.
    pub l: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            r: 50,
            t: 0,
            b: 0,
            l: 0,
        }
    }
}

/// A named sequential colour scale with its hex stops, lightest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ColorScale {
    /// Scale name.
    pub name: SequentialScale,
    /// Evenly spaced `#rrggbb` stops from low to high.
    pub stops: Vec<String>,
}

/// One shaded country on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChoroplethRegion {
    /// Location key understood by the map (country code).
    pub code: String,
    /// Entity name shown on hover.
    pub entity: String,
    /// Metric value for the year.
    pub value: f64,
    /// Fill colour, `#rrggbb`, normalised against the global range.
    pub color: String,
}

/// A world map shading every coded entity by its emissions for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChoroplethSpec {
    /// Figure title.
    pub title: String,
    /// Year the regions were taken from.
    pub year: i32,
    /// Geographic scope, e.g. `"world"`.
    pub scope: String,
    /// Map projection, e.g. `"equirectangular"`.
    pub projection: String,
    /// Colour scale used for the fills.
    pub color_scale: ColorScale,
    /// Normalisation range. Identical for every year.
    pub color_range: ColorRange,
    /// Figure margins.
    pub margin: Margin,
    /// Label of the shaded value (the metric column name).
    pub value_label: String,
    /// Regions in source order.
    pub regions: Vec<ChoroplethRegion>,
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// One bar of the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Bar {
    /// Category label (entity name).
    pub entity: String,
    /// Bar height (metric value).
    pub value: f64,
}

/// A bar chart of the metric for each selected entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BarChartSpec {
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// Bars in the order of the filtered rows. Never sorted.
    pub bars: Vec<Bar>,
}
