//! Error types for the `emissions-core` crate.
//!
//! Loading fails with [`DataLoadError`], which is fatal at startup.
//! Queries against a loaded dataset fail with [`QueryError`], which the
//! caller surfaces to the user without tearing anything down.

/// Errors that can occur while loading the emissions tables.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The source file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        /// Path that was being opened.
        path: std::path::PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The source is not well-formed CSV (bad quoting, ragged rows, bad UTF-8).
    #[error("failed to read {source_name}: {source}")]
    Csv {
        /// Name of the source being read.
        source_name: String,
        /// The underlying CSV error.
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("{source_name} is missing required column {column:?}")]
    MissingColumn {
        /// Name of the source being read.
        source_name: String,
        /// The missing column header.
        column: String,
    },

    /// A cell could not be parsed into its column type.
    #[error("{source_name} row {row}: malformed {column:?} value {value:?}")]
    Malformed {
        /// Name of the source being read.
        source_name: String,
        /// 1-based data row number (header excluded).
        row: usize,
        /// Column header of the bad cell.
        column: String,
        /// Raw cell content.
        value: String,
    },

    /// The world table has more than one record for a year.
    #[error("world table has more than one record for year {year}")]
    DuplicateWorldYear {
        /// The repeated year.
        year: i32,
    },

    /// A source contained a header but no data rows.
    #[error("{source_name} contains no records")]
    EmptyTable {
        /// Name of the empty source.
        source_name: String,
    },

    /// Configured year bounds are inverted.
    #[error("invalid year bounds: {min} is after {max}")]
    InvalidYearBounds {
        /// Configured first year.
        min: i32,
        /// Configured last year.
        max: i32,
    },

    /// Configured year bounds reach past the years the world table covers.
    #[error("year bounds {min}..={max} fall outside the world data {data_min}..={data_max}")]
    YearBoundsOutsideData {
        /// Configured first year.
        min: i32,
        /// Configured last year.
        max: i32,
        /// First year in the world table.
        data_min: i32,
        /// Last year in the world table.
        data_max: i32,
    },
}

/// Errors that can occur when querying a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The world table holds no record for the requested year.
    #[error("no world total for year {year}")]
    NoData {
        /// The year that was looked up.
        year: i32,
    },

    /// The requested year is outside the selectable range.
    #[error("year {year} is outside {min}..={max}")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
        /// First selectable year.
        min: i32,
        /// Last selectable year.
        max: i32,
    },

    /// The entity name does not appear in the all-entities table.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),
}
