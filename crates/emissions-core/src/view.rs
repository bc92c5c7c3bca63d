//! State transitions and full view recomputation.
//!
//! Both operations are pure functions of the dataset and the inputs:
//! [`apply_event`] turns a user event into the next [`QueryState`], and
//! [`recompute`] turns a state into a complete [`ViewResult`]. Neither
//! touches shared state, so repeated or concurrent calls are safe and
//! always agree.

use emissions_types::{QueryEvent, QueryState, ViewResult};
use tracing::{debug, warn};

use crate::dataset::EmissionsDataset;
use crate::error::QueryError;
use crate::figure::{build_bar_chart, build_choropleth};
use crate::query::{filter_by_year_and_entities, world_total_for_year};

/// Readout shown when the world table has no total for the year.
pub const WORLD_TOTAL_PLACEHOLDER: &str = "n/a";

/// The state the dashboard opens with.
pub fn default_state(dataset: &EmissionsDataset) -> QueryState {
    dataset.default_state().clone()
}

fn check_year(dataset: &EmissionsDataset, year: i32) -> Result<(), QueryError> {
    let years = dataset.years();
    if years.contains(year) {
        Ok(())
    } else {
        Err(QueryError::YearOutOfRange {
            year,
            min: years.min,
            max: years.max,
        })
    }
}

fn check_entity(dataset: &EmissionsDataset, entity: &str) -> Result<(), QueryError> {
    if dataset.is_known_entity(entity) {
        Ok(())
    } else {
        Err(QueryError::UnknownEntity(entity.to_owned()))
    }
}

/// Reject a state whose year is out of range or that names an unknown entity.
///
/// # Errors
///
/// Returns [`QueryError::YearOutOfRange`] or [`QueryError::UnknownEntity`].
pub fn validate_state(dataset: &EmissionsDataset, state: &QueryState) -> Result<(), QueryError> {
    check_year(dataset, state.selected_year)?;
    state
        .selected_entities
        .iter()
        .try_for_each(|e| check_entity(dataset, e))
}

/// Apply one user event to `state`, returning the next state.
///
/// `state` itself is left untouched. Removing an entity that is known
/// but not selected is a no-op.
///
/// # Errors
///
/// Returns [`QueryError::YearOutOfRange`] for a year outside the slider
/// bounds and [`QueryError::UnknownEntity`] for a name not in the data.
pub fn apply_event(
    dataset: &EmissionsDataset,
    state: &QueryState,
    event: &QueryEvent,
) -> Result<QueryState, QueryError> {
    let mut next = state.clone();
    match event {
        QueryEvent::SetYear { year } => {
            check_year(dataset, *year)?;
            next.selected_year = *year;
        }
        QueryEvent::SetEntities { entities } => {
            entities.iter().try_for_each(|e| check_entity(dataset, e))?;
            next.selected_entities.clone_from(entities);
        }
        QueryEvent::AddEntity { entity } => {
            check_entity(dataset, entity)?;
            next.selected_entities.insert(entity.clone());
        }
        QueryEvent::RemoveEntity { entity } => {
            check_entity(dataset, entity)?;
            next.selected_entities.remove(entity);
        }
    }
    Ok(next)
}

/// The world total truncated toward zero, followed by `unit`.
pub fn format_world_total(total: f64, unit: &str) -> String {
    format!("{:.0} {unit}", total.trunc())
}

/// Rebuild the full view for `state`.
///
/// A missing world total is not an error here: the view carries `None`
/// and a placeholder readout so the rest of the dashboard still renders.
///
/// # Errors
///
/// Returns the [`validate_state`] error for an invalid `state`.
pub fn recompute(dataset: &EmissionsDataset, state: &QueryState) -> Result<ViewResult, QueryError> {
    validate_state(dataset, state)?;
    let year = state.selected_year;

    let world_total = match world_total_for_year(dataset.world(), year) {
        Ok(total) => Some(total),
        Err(e) => {
            warn!(year, error = %e, "World total unavailable, showing placeholder");
            None
        }
    };
    let world_total_readout = world_total.map_or_else(
        || String::from(WORLD_TOTAL_PLACEHOLDER),
        |t| format_world_total(t, dataset.unit_label()),
    );

    let filtered_rows = filter_by_year_and_entities(dataset.all(), year, &state.selected_entities);
    let choropleth = build_choropleth(
        dataset.all(),
        year,
        dataset.color_range(),
        dataset.style(),
        dataset.metric(),
    );
    let bar_chart = build_bar_chart(&filtered_rows, dataset.metric());

    debug!(
        year,
        selected = state.selected_entities.len(),
        rows = filtered_rows.len(),
        regions = choropleth.regions.len(),
        "View recomputed"
    );

    Ok(ViewResult {
        year,
        world_total_for_year: world_total,
        world_total_readout,
        filtered_rows,
        choropleth,
        bar_chart,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::dataset::{DatasetOptions, load_from_readers};

    const ALL_CSV: &str = "\
Entity,Code,Year,Annual CO₂ emissions
France,FRA,2019,310
United Kingdom,GBR,2019,360
Germany,DEU,2019,700
France,FRA,2020,280
United Kingdom,GBR,2020,330
Germany,DEU,2020,640
France,FRA,2021,300
United Kingdom,GBR,2021,340
Germany,DEU,2021,670
";

    // 2020 is deliberately missing from the world table.
    const WORLD_CSV: &str = "\
Entity,Year,Annual CO₂ emissions
World,2019,36702503000.7
World,2021,37123850000.9
";

    fn dataset() -> Option<EmissionsDataset> {
        let (all, world) = load_from_readers(
            ALL_CSV.as_bytes(),
            WORLD_CSV.as_bytes(),
            crate::dataset::DEFAULT_METRIC_COLUMN,
        )
        .ok()?;
        EmissionsDataset::build(all, world, DatasetOptions::default()).ok()
    }

    #[test]
    fn default_state_is_latest_year_france_and_uk() {
        let Some(ds) = dataset() else {
            panic!("fixture failed to load");
        };
        let state = default_state(&ds);
        assert_eq!(state, QueryState::new(2021, ["France", "United Kingdom"]));
    }

    #[test]
    fn recompute_default_view() {
        let Some(ds) = dataset() else {
            panic!("fixture failed to load");
        };
        let view = recompute(&ds, &default_state(&ds));
        let Ok(view) = view else {
            panic!("recompute failed: {view:?}");
        };
        assert_eq!(view.year, 2021);
        assert_eq!(view.filtered_rows.len(), 2);
        assert_eq!(view.bar_chart.bars.len(), 2);
        assert_eq!(view.choropleth.regions.len(), 3);
        assert_eq!(view.world_total_readout, "37123850000 tonnes");
    }

    #[test]
    fn missing_world_year_gives_placeholder() {
        let Some(ds) = dataset() else {
            panic!("fixture failed to load");
        };
        let view = recompute(&ds, &QueryState::new(2020, ["France"]));
        let Ok(view) = view else {
            panic!("recompute failed: {view:?}");
        };
        assert_eq!(view.world_total_for_year, None);
        assert_eq!(view.world_total_readout, WORLD_TOTAL_PLACEHOLDER);
        assert_eq!(view.filtered_rows.len(), 1);
    }

    #[test]
    fn empty_selection_leaves_choropleth_unchanged() {
        let Some(ds) = dataset() else {
            panic!("fixture failed to load");
        };
        let with = recompute(&ds, &QueryState::new(2021, ["France"]));
        let without = recompute(&ds, &QueryState::new(2021, Vec::<String>::new()));
        let (Ok(with), Ok(without)) = (with, without) else {
            panic!("recompute failed");
        };
        assert!(without.filtered_rows.is_empty());
        assert!(without.bar_chart.bars.is_empty());
        assert_eq!(with.choropleth, without.choropleth);
    }

    #[test]
    fn recompute_rejects_out_of_range_year_and_unknown_entity() {
        let Some(ds) = dataset() else {
            panic!("fixture failed to load");
        };
        assert_eq!(
            recompute(&ds, &QueryState::new(2030, ["France"])).err(),
            Some(QueryError::YearOutOfRange {
                year: 2030,
                min: 2019,
                max: 2021
            })
        );
        assert_eq!(
            recompute(&ds, &QueryState::new(2021, ["Atlantis"])).err(),
            Some(QueryError::UnknownEntity(String::from("Atlantis")))
        );
    }

    #[test]
    fn events_produce_new_state_without_mutating_old() {
        let Some(ds) = dataset() else {
            panic!("fixture failed to load");
        };
        let start = default_state(&ds);

        let moved = apply_event(&ds, &start, &QueryEvent::SetYear { year: 2019 });
        assert_eq!(moved.as_ref().map(|s| s.selected_year).ok(), Some(2019));
        assert_eq!(start.selected_year, 2021);

        let added = apply_event(
            &ds,
            &start,
            &QueryEvent::AddEntity {
                entity: String::from("Germany"),
            },
        );
        assert_eq!(
            added.map(|s| s.selected_entities.len()).ok(),
            Some(3)
        );

        let removed = apply_event(
            &ds,
            &start,
            &QueryEvent::RemoveEntity {
                entity: String::from("France"),
            },
        );
        assert_eq!(
            removed.map(|s| s.selected_entities).ok(),
            Some(BTreeSet::from([String::from("United Kingdom")]))
        );

        let replaced = apply_event(
            &ds,
            &start,
            &QueryEvent::SetEntities {
                entities: BTreeSet::new(),
            },
        );
        assert_eq!(
            replaced.map(|s| s.selected_entities.is_empty()).ok(),
            Some(true)
        );
    }

    #[test]
    fn events_reject_invalid_input() {
        let Some(ds) = dataset() else {
            panic!("fixture failed to load");
        };
        let start = default_state(&ds);
        assert!(matches!(
            apply_event(&ds, &start, &QueryEvent::SetYear { year: 1800 }),
            Err(QueryError::YearOutOfRange { year: 1800, .. })
        ));
        assert!(matches!(
            apply_event(
                &ds,
                &start,
                &QueryEvent::AddEntity {
                    entity: String::from("Atlantis")
                }
            ),
            Err(QueryError::UnknownEntity(_))
        ));
    }

    #[test]
    fn readout_truncates_toward_zero() {
        assert_eq!(format_world_total(37_123_850_000.9, "tonnes"), "37123850000 tonnes");
        assert_eq!(format_world_total(5.99, "t"), "5 t");
    }
}
