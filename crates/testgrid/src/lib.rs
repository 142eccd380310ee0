//! # testgrid
//!
//! Spreadsheet-backed test data and result logging.
//!
//! Test inputs live in a named sheet of an `.xlsx` workbook. The first row is
//! a header; every later row becomes a [`Record`] keyed by header text, with
//! each cell coerced to a [`Value`]. Test results go the other way: a
//! workbook is created with a header row and rows are appended one at a time.
//!
//! ## Reading test data
//!
//! ```no_run
//! use testgrid::prelude::*;
//!
//! let sheet = DataSheet::open("data/checkout.xlsx", "Orders")?;
//! for record in sheet.read_records()? {
//!     let sku = record.get("sku").and_then(Value::as_text).unwrap_or_default();
//!     let qty = record.get("qty").and_then(Value::as_number).unwrap_or(1.0);
//!     println!("{sku} x {qty}");
//! }
//! # Ok::<(), testgrid::Error>(())
//! ```
//!
//! ## Logging results
//!
//! ```no_run
//! use testgrid::prelude::*;
//!
//! let path = write_header("results.xlsx", ["Case", "Status"])?;
//! append_row(&path, ["checkout", "pass"])?;
//! # Ok::<(), testgrid::Error>(())
//! ```
//!
//! Every write builds the complete package in memory and renames it over the
//! destination, so a failed write never leaves a half-written workbook.

pub mod error;
pub mod files;
mod io;
pub mod prelude;
pub mod projection;
pub mod sheet;
pub mod value;
pub mod writer;

pub use error::{Error, Result};
pub use files::{
    create_results_file, create_results_file_in, create_results_file_with_timestamp,
    create_results_file_with_timestamp_in, results_file_path, timestamped_file_path,
};
pub use projection::{project_row, read_header, read_records, Record};
pub use sheet::{read_records_from, DataSheet};
pub use value::{coerce, Value};
pub use writer::{
    append_row, append_row_with, write_header, write_header_with, WriterOptions,
    NON_TEXT_PLACEHOLDER, RESULTS_SHEET,
};

// Re-export the workbook model and container
pub use testgrid_core::{CellAddress, CellKind, CellValue, Row, Workbook, Worksheet};
pub use testgrid_xlsx::{XlsxError, XlsxReader, XlsxWriter};

use std::path::Path;

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt: Sized {
    /// Open an `.xlsx` workbook from a file
    fn open<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Save the workbook to a file, replacing it atomically
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        io::open_workbook(path.as_ref())
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        io::save_workbook(self, path.as_ref())
    }
}
