//! CSV loading and the immutable [`EmissionsDataset`].
//!
//! Two sources are read once at startup: one with every entity and one
//! with only the world aggregate. Columns are located by header name, so
//! an ordinal index column (an empty or `Unnamed: 0` header written by a
//! dataframe export) is simply never read. Any missing column or bad cell
//! aborts the whole load.

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use emissions_types::{ColorRange, EmissionsRecord, QueryState, YearBounds};
use tracing::{info, warn};

use crate::error::DataLoadError;
use crate::figure::ChoroplethStyle;
use crate::query;

/// Header of the entity-name column.
pub const ENTITY_COLUMN: &str = "Entity";
/// Header of the country-code column.
pub const CODE_COLUMN: &str = "Code";
/// Header of the year column.
pub const YEAR_COLUMN: &str = "Year";
/// Default header of the emissions metric column.
pub const DEFAULT_METRIC_COLUMN: &str = "Annual CO₂ emissions";

/// Entities selected when the dashboard first opens.
pub const DEFAULT_ENTITIES: [&str; 2] = ["France", "United Kingdom"];

// ---------------------------------------------------------------------------
// EmissionsTable
// ---------------------------------------------------------------------------

/// An ordered, read-only sequence of [`EmissionsRecord`]s from one source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmissionsTable {
    source_name: String,
    records: Vec<EmissionsRecord>,
}

impl EmissionsTable {
    /// Wrap already-parsed records. Order is preserved.
    pub fn new(source_name: impl Into<String>, records: Vec<EmissionsRecord>) -> Self {
        Self {
            source_name: source_name.into(),
            records,
        }
    }

    /// Name of the source the table was read from.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// All records in source order.
    pub fn records(&self) -> &[EmissionsRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records for `year`, in source order.
    pub fn for_year(&self, year: i32) -> impl Iterator<Item = &EmissionsRecord> {
        self.records.iter().filter(move |r| r.year == year)
    }

    /// Earliest and latest year present, or `None` for an empty table.
    pub fn year_span(&self) -> Option<YearBounds> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some(YearBounds { min, max })
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Column positions resolved from a header row.
struct ColumnLayout {
    entity: usize,
    code: Option<usize>,
    year: usize,
    metric: usize,
}

fn locate_columns(
    headers: &csv::StringRecord,
    source_name: &str,
    metric_column: &str,
    require_code: bool,
) -> Result<ColumnLayout, DataLoadError> {
    let find = |name: &str| headers.iter().position(|h| h == name);
    let require = |name: &str| {
        find(name).ok_or_else(|| DataLoadError::MissingColumn {
            source_name: source_name.to_owned(),
            column: name.to_owned(),
        })
    };

    let entity = require(ENTITY_COLUMN)?;
    let code = if require_code {
        Some(require(CODE_COLUMN)?)
    } else {
        find(CODE_COLUMN)
    };
    let year = require(YEAR_COLUMN)?;
    let metric = require(metric_column)?;

    Ok(ColumnLayout {
        entity,
        code,
        year,
        metric,
    })
}

/// Parse one CSV source into a table.
///
/// `require_code` is `false` for the world-aggregate source, which may
/// omit the `Code` column entirely.
///
/// # Errors
///
/// Returns [`DataLoadError::Csv`] for unreadable CSV,
/// [`DataLoadError::MissingColumn`] if a required header is absent,
/// [`DataLoadError::Malformed`] for a cell that does not parse, and
/// [`DataLoadError::EmptyTable`] if there are no data rows.
pub fn parse_table<R: Read>(
    reader: R,
    source_name: &str,
    metric_column: &str,
    require_code: bool,
) -> Result<EmissionsTable, DataLoadError> {
    let csv_error = |source: csv::Error| DataLoadError::Csv {
        source_name: source_name.to_owned(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let layout = locate_columns(&headers, source_name, metric_column, require_code)?;

    let mut records = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let row = index.saturating_add(1);
        let record = result.map_err(csv_error)?;
        let cell = |at: usize| record.get(at).unwrap_or_default();
        let malformed = |column: &str, value: &str| DataLoadError::Malformed {
            source_name: source_name.to_owned(),
            row,
            column: column.to_owned(),
            value: value.to_owned(),
        };

        let entity = cell(layout.entity);
        if entity.is_empty() {
            return Err(malformed(ENTITY_COLUMN, entity));
        }

        let code = layout
            .code
            .map(cell)
            .filter(|c| !c.is_empty())
            .map(str::to_owned);

        let raw_year = cell(layout.year);
        let year = raw_year
            .parse::<i32>()
            .ok()
            .ok_or_else(|| malformed(YEAR_COLUMN, raw_year))?;

        let raw_metric = cell(layout.metric);
        let annual_emissions = raw_metric
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| malformed(metric_column, raw_metric))?;

        records.push(EmissionsRecord {
            entity: entity.to_owned(),
            code,
            year,
            annual_emissions,
        });
    }

    if records.is_empty() {
        return Err(DataLoadError::EmptyTable {
            source_name: source_name.to_owned(),
        });
    }

    Ok(EmissionsTable::new(source_name, records))
}

/// Check the one-record-per-year invariant of the world table.
fn check_world_years(world: &EmissionsTable) -> Result<(), DataLoadError> {
    let mut seen = HashSet::new();
    for record in world.records() {
        if !seen.insert(record.year) {
            return Err(DataLoadError::DuplicateWorldYear { year: record.year });
        }
    }
    Ok(())
}

/// Load both tables from in-memory or streaming readers.
///
/// Returns `(all_entities, world)`.
///
/// # Errors
///
/// Returns any [`parse_table`] error, or
/// [`DataLoadError::DuplicateWorldYear`] if the world table repeats a year.
pub fn load_from_readers<A: Read, W: Read>(
    all_entities: A,
    world: W,
    metric_column: &str,
) -> Result<(EmissionsTable, EmissionsTable), DataLoadError> {
    let all = parse_table(all_entities, "all-entities", metric_column, true)?;
    let world = parse_table(world, "world", metric_column, false)?;
    check_world_years(&world)?;
    Ok((all, world))
}

/// Load both tables from CSV files on disk.
///
/// Returns `(all_entities, world)`.
///
/// # Errors
///
/// Returns [`DataLoadError::Io`] if a file cannot be opened, otherwise the
/// same errors as [`load_from_readers`].
pub fn load_from_paths(
    all_entities_path: &Path,
    world_path: &Path,
    metric_column: &str,
) -> Result<(EmissionsTable, EmissionsTable), DataLoadError> {
    let open = |path: &Path| {
        File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let all_name = all_entities_path.display().to_string();
    let world_name = world_path.display().to_string();

    let all = parse_table(open(all_entities_path)?, &all_name, metric_column, true)?;
    let world = parse_table(open(world_path)?, &world_name, metric_column, false)?;
    check_world_years(&world)?;

    info!(
        all_entities = %all_name,
        all_records = all.len(),
        world = %world_name,
        world_records = world.len(),
        "Emissions tables loaded"
    );

    Ok((all, world))
}

// ---------------------------------------------------------------------------
// EmissionsDataset
// ---------------------------------------------------------------------------

/// Settings that shape an [`EmissionsDataset`] beyond the raw tables.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetOptions {
    /// Header of the emissions metric column.
    pub metric: String,
    /// Override for the first selectable year.
    pub year_min: Option<i32>,
    /// Override for the last selectable year.
    pub year_max: Option<i32>,
    /// Entities selected on first load.
    pub default_entities: Vec<String>,
    /// Map presentation settings.
    pub style: ChoroplethStyle,
    /// Unit appended to the world total readout.
    pub unit_label: String,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            metric: String::from(DEFAULT_METRIC_COLUMN),
            year_min: None,
            year_max: None,
            default_entities: DEFAULT_ENTITIES.iter().map(|s| (*s).to_owned()).collect(),
            style: ChoroplethStyle::default(),
            unit_label: String::from("tonnes"),
        }
    }
}

/// The loaded tables plus everything derived from them once at startup.
///
/// Immutable for the life of the process and passed explicitly to every
/// engine operation. Sharing it across threads needs no locking.
#[derive(Debug, Clone)]
pub struct EmissionsDataset {
    all: EmissionsTable,
    world: EmissionsTable,
    color_range: ColorRange,
    years: YearBounds,
    entities: Vec<String>,
    known: HashSet<String>,
    default_state: QueryState,
    options: DatasetOptions,
}

impl EmissionsDataset {
    /// Derive bounds, entity list, and default state from two loaded tables.
    ///
    /// The colour range comes from the all-entities table only. Year bounds
    /// come from the world table unless overridden in `options`; overrides
    /// may narrow the world table's span but never widen it.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError::EmptyTable`] if either table has no records,
    /// [`DataLoadError::InvalidYearBounds`] if the configured bounds are
    /// inverted, and [`DataLoadError::YearBoundsOutsideData`] if they reach
    /// past the years the world table covers.
    pub fn build(
        all: EmissionsTable,
        world: EmissionsTable,
        options: DatasetOptions,
    ) -> Result<Self, DataLoadError> {
        let color_range = query::global_bounds(&all).ok_or_else(|| DataLoadError::EmptyTable {
            source_name: all.source_name().to_owned(),
        })?;
        let span = world.year_span().ok_or_else(|| DataLoadError::EmptyTable {
            source_name: world.source_name().to_owned(),
        })?;

        let years = YearBounds {
            min: options.year_min.unwrap_or(span.min),
            max: options.year_max.unwrap_or(span.max),
        };
        if years.min > years.max {
            return Err(DataLoadError::InvalidYearBounds {
                min: years.min,
                max: years.max,
            });
        }
        if years.min < span.min || years.max > span.max {
            return Err(DataLoadError::YearBoundsOutsideData {
                min: years.min,
                max: years.max,
                data_min: span.min,
                data_max: span.max,
            });
        }

        let missing_world_years = years
            .years()
            .filter(|y| world.for_year(*y).next().is_none())
            .count();
        if missing_world_years > 0 {
            warn!(
                missing_world_years,
                min = years.min,
                max = years.max,
                "World table does not cover every selectable year"
            );
        }

        let entities = query::distinct_entities(&all);
        let known: HashSet<String> = entities.iter().cloned().collect();

        let mut selected = BTreeSet::new();
        for name in &options.default_entities {
            if known.contains(name) {
                selected.insert(name.clone());
            } else {
                warn!(entity = %name, "Default entity not present in data, dropping");
            }
        }
        let default_state = QueryState {
            selected_year: years.max,
            selected_entities: selected,
        };

        info!(
            entities = entities.len(),
            min_year = years.min,
            max_year = years.max,
            color_min = color_range.min,
            color_max = color_range.max,
            "Emissions dataset ready"
        );

        Ok(Self {
            all,
            world,
            color_range,
            years,
            entities,
            known,
            default_state,
            options,
        })
    }

    /// The all-entities table.
    pub const fn all(&self) -> &EmissionsTable {
        &self.all
    }

    /// The world-aggregate table.
    pub const fn world(&self) -> &EmissionsTable {
        &self.world
    }

    /// Global colour normalisation range.
    pub const fn color_range(&self) -> ColorRange {
        self.color_range
    }

    /// Selectable year range.
    pub const fn years(&self) -> YearBounds {
        self.years
    }

    /// Distinct entity names in first-appearance order.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// Whether `entity` appears in the all-entities table.
    pub fn is_known_entity(&self, entity: &str) -> bool {
        self.known.contains(entity)
    }

    /// State the dashboard opens with.
    pub const fn default_state(&self) -> &QueryState {
        &self.default_state
    }

    /// Header of the metric column.
    pub fn metric(&self) -> &str {
        &self.options.metric
    }

    /// Map presentation settings.
    pub const fn style(&self) -> &ChoroplethStyle {
        &self.options.style
    }

    /// Unit appended to the world total readout.
    pub fn unit_label(&self) -> &str {
        &self.options.unit_label
    }
}
