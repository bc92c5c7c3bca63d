//! Pure read queries over an [`EmissionsTable`].

use std::collections::{BTreeSet, HashSet};

use emissions_types::{ColorRange, EmissionsRecord};

use crate::dataset::EmissionsTable;
use crate::error::QueryError;

/// Minimum and maximum metric across the whole table.
///
/// Returns `None` for an empty table.
pub fn global_bounds(table: &EmissionsTable) -> Option<ColorRange> {
    let mut values = table.records().iter().map(|r| r.annual_emissions);
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some(ColorRange { min, max })
}

/// Every record of `year` whose entity is in `entities`, in source order.
///
/// An empty selection yields an empty vector.
pub fn filter_by_year_and_entities(
    table: &EmissionsTable,
    year: i32,
    entities: &BTreeSet<String>,
) -> Vec<EmissionsRecord> {
    if entities.is_empty() {
        return Vec::new();
    }
    table
        .for_year(year)
        .filter(|r| entities.contains(&r.entity))
        .cloned()
        .collect()
}

/// The world aggregate metric for `year`.
///
/// # Errors
///
/// Returns [`QueryError::NoData`] if the world table has no record for `year`.
pub fn world_total_for_year(world: &EmissionsTable, year: i32) -> Result<f64, QueryError> {
    world
        .for_year(year)
        .next()
        .map(|r| r.annual_emissions)
        .ok_or(QueryError::NoData { year })
}

/// Distinct entity names in order of first appearance.
pub fn distinct_entities(table: &EmissionsTable) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .records()
        .iter()
        .filter(|r| seen.insert(r.entity.as_str()))
        .map(|r| r.entity.clone())
        .collect()
}
