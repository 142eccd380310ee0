//! Error types for testgrid

use std::path::PathBuf;

use testgrid_core::CellKind;
use testgrid_xlsx::XlsxError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the reading and writing operations.
///
/// Nothing is retried: local file access either works or is reported here.
#[derive(Debug, Error)]
pub enum Error {
    /// The workbook file to read does not exist
    #[error("workbook not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but is not a readable workbook package
    #[error("not a valid workbook: {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// Any other I/O failure while reading
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested sheet is not in the workbook
    #[error("sheet not found: {0}")]
    MissingSheet(String),

    /// A row needed to build records does not exist
    #[error("row {0} does not exist")]
    MissingRow(u32),

    /// The destination could not be written, or serialization failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// The cell holds a kind of value that has no coerced form
    #[error("cannot coerce {kind} cell at row {row}, column {col}")]
    UnsupportedCellKind { row: u32, col: u16, kind: CellKind },

    /// Workbook model error
    #[error(transparent)]
    Core(#[from] testgrid_core::Error),
}
