//! Shared type definitions for the emissions dashboard.
//!
//! This crate is the single source of truth for every value that crosses
//! a crate or process boundary. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for the browser dashboard.
//!
//! # Modules
//!
//! - [`enums`] -- Named sequential colour scales
//! - [`structs`] -- Records, query state, view result, dashboard metadata
//! - [`figures`] -- Choropleth and bar chart descriptions
//! - [`events`] -- User events that drive state transitions

pub mod enums;
pub mod events;
pub mod figures;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::SequentialScale;
pub use events::QueryEvent;
pub use figures::{Bar, BarChartSpec, ChoroplethRegion, ChoroplethSpec, ColorScale, Margin};
pub use structs::{
    ColorRange, DashboardMeta, EmissionsRecord, QueryState, ViewResult, YearBounds,
};

#[cfg(test)]
mod tests {
    //! Type export and wire-format checks.

    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn export_bindings() {
        // ts-rs writes the TypeScript files to `bindings/` relative to
        // the crate root when `export_all` runs.
        use ts_rs::TS;

        let _ = crate::enums::SequentialScale::export_all();
        let _ = crate::events::QueryEvent::export_all();

        let _ = crate::structs::EmissionsRecord::export_all();
        let _ = crate::structs::ColorRange::export_all();
        let _ = crate::structs::YearBounds::export_all();
        let _ = crate::structs::QueryState::export_all();
        let _ = crate::structs::ViewResult::export_all();
        let _ = crate::structs::DashboardMeta::export_all();

        let _ = crate::figures::Margin::export_all();
        let _ = crate::figures::ColorScale::export_all();
        let _ = crate::figures::ChoroplethRegion::export_all();
        let _ = crate::figures::ChoroplethSpec::export_all();
        let _ = crate::figures::Bar::export_all();
        let _ = crate::figures::BarChartSpec::export_all();
    }

    #[test]
    fn query_event_uses_type_tag() {
        let event = QueryEvent::SetYear { year: 1990 };
        let json = serde_json::to_value(&event).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "type": "set_year", "year": 1990 }))
        );

        let parsed: Result<QueryEvent, _> =
            serde_json::from_str(r#"{"type":"add_entity","entity":"France"}"#);
        assert_eq!(
            parsed.ok(),
            Some(QueryEvent::AddEntity {
                entity: String::from("France")
            })
        );
    }

    #[test]
    fn query_state_deduplicates_entities() {
        let state = QueryState::new(2021, ["France", "France", "United Kingdom"]);
        let expected: BTreeSet<String> = ["France", "United Kingdom"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(state.selected_entities, expected);
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let bounds = YearBounds {
            min: 1950,
            max: 2021,
        };
        assert!(bounds.contains(1950));
        assert!(bounds.contains(2021));
        assert!(!bounds.contains(1949));
        assert!(!bounds.contains(2022));
        assert_eq!(bounds.years().count(), 72);
    }

    #[test]
    fn default_margin_leaves_room_for_colour_bar() {
        let margin = Margin::default();
        assert_eq!((margin.r, margin.t, margin.b, margin.l), (50, 0, 0, 0));
    }
}
