use std::path::PathBuf;

use thiserror::Error;

use crate::aamc::tables::model::TableKind;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads, reshapes, or writes the admissions tables.
#[derive(Debug, Error)]
pub enum TableError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the run manifest cannot be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a sheet does not have the rows or columns its configured
    /// shape promises.
    #[error("sheet {} does not match its configured shape: {detail}", path.display())]
    ConfigMismatch { path: PathBuf, detail: String },

    /// Raised when the "Total" row search does not yield exactly one final row.
    #[error("expected exactly one trailing totals row in {}, found {matches}", path.display())]
    TotalsAmbiguity { path: PathBuf, matches: usize },

    /// Raised when a metric cell holds text that is not a count.
    #[error("invalid literal value '{value}' in column {column}")]
    InvalidLiteral { column: String, value: String },

    /// Raised when a year has no configured header/footer shape.
    #[error("no sheet shape configured for {table} {year}")]
    MissingShape { table: TableKind, year: u16 },

    /// Raised when a configured year has no input file.
    #[error("no input file for {table} {year}")]
    MissingYear { table: TableKind, year: u16 },

    /// Raised when a year has no corrected totals entry.
    #[error("no corrected totals configured for {table} {year}")]
    MissingCorrection { table: TableKind, year: u16 },

    /// Raised when discovery finds two files for the same year.
    #[error("two files claim year {year}: {} and {}", first.display(), second.display())]
    DuplicateYear {
        year: u16,
        first: PathBuf,
        second: PathBuf,
    },

    /// Wraps any failure with the table and year being processed.
    #[error("{table} {year} failed: {source}")]
    Year {
        table: TableKind,
        year: u16,
        #[source]
        source: Box<TableError>,
    },

    /// Raised when the user provides a path that does not exist.
    #[error("input not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when neither a manifest nor an input directory was supplied.
    #[error("nothing to merge: supply a manifest or at least one input directory")]
    NothingToMerge,

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl TableError {
    /// Tags the error with the table and year that produced it.
    pub fn in_year(self, table: TableKind, year: u16) -> Self {
        TableError::Year {
            table,
            year,
            source: Box::new(self),
        }
    }
}
