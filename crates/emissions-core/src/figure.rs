//! Figure construction: the choropleth map and the comparison bar chart.

use emissions_types::{
    Bar, BarChartSpec, ChoroplethRegion, ChoroplethSpec, ColorRange, EmissionsRecord, Margin,
    SequentialScale,
};

use crate::color;
use crate::dataset::{ENTITY_COLUMN, EmissionsTable};

/// Presentation settings for the choropleth.
///
/// Defaults reproduce the classic dashboard look: a red sequential scale
/// on an equirectangular world map with a right margin for the colour bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoroplethStyle {
    /// Figure title.
    pub title: String,
    /// Geographic scope.
    pub scope: String,
    /// Map projection.
    pub projection: String,
    /// Sequential colour scale.
    pub scale: SequentialScale,
    /// Figure margins.
    pub margin: Margin,
}

impl Default for ChoroplethStyle {
    fn default() -> Self {
        Self {
            title: String::from("World CO2 Emissions"),
            scope: String::from("world"),
            projection: String::from("equirectangular"),
            scale: SequentialScale::Reds,
            margin: Margin::default(),
        }
    }
}

/// Build the map for `year` across every entity in `table`.
///
/// Records without a country code have no map location and are skipped.
/// Fill colours are normalised against `color_range`, which the caller
/// passes unchanged for every year so colours stay comparable.
pub fn build_choropleth(
    table: &EmissionsTable,
    year: i32,
    color_range: ColorRange,
    style: &ChoroplethStyle,
    value_label: &str,
) -> ChoroplethSpec {
    let regions = table
        .for_year(year)
        .filter_map(|r| {
            r.code.as_ref().map(|code| ChoroplethRegion {
                code: code.clone(),
                entity: r.entity.clone(),
                value: r.annual_emissions,
                color: color::color_for(r.annual_emissions, color_range, style.scale),
            })
        })
        .collect();

    ChoroplethSpec {
        title: style.title.clone(),
        year,
        scope: style.scope.clone(),
        projection: style.projection.clone(),
        color_scale: color::color_scale(style.scale),
        color_range,
        margin: style.margin,
        value_label: value_label.to_owned(),
        regions,
    }
}

/// One bar per row: entity on x, metric on y, in row order.
pub fn build_bar_chart(filtered_rows: &[EmissionsRecord], y_label: &str) -> BarChartSpec {
    BarChartSpec {
        x_label: String::from(ENTITY_COLUMN),
        y_label: y_label.to_owned(),
        bars: filtered_rows
            .iter()
            .map(|r| Bar {
                entity: r.entity.clone(),
                value: r.annual_emissions,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entity: &str, code: Option<&str>, year: i32, value: f64) -> EmissionsRecord {
        EmissionsRecord {
            entity: entity.to_owned(),
            code: code.map(str::to_owned),
            year,
            annual_emissions: value,
        }
    }

    fn table() -> EmissionsTable {
        EmissionsTable::new(
            "test",
            vec![
                record("France", Some("FRA"), 2020, 100.0),
                record("Europe", None, 2020, 900.0),
                record("Germany", Some("DEU"), 2020, 200.0),
                record("France", Some("FRA"), 2021, 150.0),
            ],
        )
    }

    const RANGE: ColorRange = ColorRange {
        min: 0.0,
        max: 1000.0,
    };

    #[test]
    fn choropleth_skips_uncoded_records() {
        let spec = build_choropleth(&table(), 2020, RANGE, &ChoroplethStyle::default(), "m");
        let codes: Vec<&str> = spec.regions.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, ["FRA", "DEU"]);
        assert_eq!(spec.regions[0].entity, "France");
    }

    #[test]
    fn choropleth_carries_explicit_style() {
        let spec = build_choropleth(&table(), 2020, RANGE, &ChoroplethStyle::default(), "m");
        assert_eq!(spec.title, "World CO2 Emissions");
        assert_eq!(spec.scope, "world");
        assert_eq!(spec.projection, "equirectangular");
        assert_eq!(spec.color_scale.name, SequentialScale::Reds);
        assert_eq!(spec.margin, Margin::default());
        assert_eq!(spec.value_label, "m");
        assert_eq!(spec.year, 2020);
    }

    #[test]
    fn colour_range_is_the_one_passed_in() {
        let style = ChoroplethStyle::default();
        let a = build_choropleth(&table(), 2020, RANGE, &style, "m");
        let b = build_choropleth(&table(), 2021, RANGE, &style, "m");
        assert_eq!(a.color_range, RANGE);
        assert_eq!(b.color_range, RANGE);
        // Same value, same colour, whatever the year.
        let france_2021 = &b.regions[0];
        assert_eq!(
            france_2021.color,
            color::color_for(150.0, RANGE, SequentialScale::Reds)
        );
    }

    #[test]
    fn choropleth_for_year_without_data_is_empty() {
        let spec = build_choropleth(&table(), 1900, RANGE, &ChoroplethStyle::default(), "m");
        assert!(spec.regions.is_empty());
    }

    #[test]
    fn bar_chart_preserves_row_order() {
        let rows = vec![
            record("Germany", Some("DEU"), 2020, 200.0),
            record("France", Some("FRA"), 2020, 100.0),
        ];
        let chart = build_bar_chart(&rows, "Annual CO₂ emissions");
        assert_eq!(chart.x_label, "Entity");
        assert_eq!(chart.y_label, "Annual CO₂ emissions");
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.entity.as_str()).collect();
        assert_eq!(labels, ["Germany", "France"]);
    }

    #[test]
    fn bar_chart_of_no_rows_has_no_bars() {
        assert!(build_bar_chart(&[], "m").bars.is_empty());
    }
}
