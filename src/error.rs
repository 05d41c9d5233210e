//! Error types for run-table parsing and aggregation.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while reading or aggregating run tables.
///
/// Every variant aborts the whole aggregation call; there is no
/// row-level recovery.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A data line does not have the field count its schema requires.
    #[error(
        "malformed row at {}:{line}: expected {expected} fields, found {found}",
        .path.display()
    )]
    MalformedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A degree or statistic field could not be read as a number.
    #[error("invalid {field} value {value:?} at {}:{line}", .path.display())]
    NumericConversion {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
    },

    /// The file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tab-separated stream could not be read or written.
    #[error("tab-separated I/O failed for {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, AggregateError>;
