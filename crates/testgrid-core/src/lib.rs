//! # testgrid-core
//!
//! In-memory workbook model used by the testgrid crates.
//!
//! - [`Workbook`] - an ordered list of named [`Worksheet`]s
//! - [`Worksheet`] - sparse rows keyed by index
//! - [`Row`] - sparse cells keyed by column
//! - [`CellValue`] / [`CellKind`] - what a cell holds
//!
//! ## Example
//!
//! ```rust
//! use testgrid_core::{CellValue, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let idx = workbook.add_worksheet_with_name("Data").unwrap();
//! let sheet = workbook.worksheet_mut(idx).unwrap();
//!
//! sheet.set_cell_value("A1", "Name").unwrap();
//! sheet.set_cell_value_at(1, 0, CellValue::Number(3.0)).unwrap();
//!
//! assert_eq!(sheet.last_row_num(), 1);
//! ```

pub mod cell;
pub mod error;
pub mod row;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellKind, CellValue};
pub use error::{Error, Result};
pub use row::Row;
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
