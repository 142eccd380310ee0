//! Results workbook writer
//!
//! A results workbook has one sheet, `TestResults` by default, whose first
//! row is a header. Each call to [`append_row`] reads the file, adds one row
//! after the last one and saves it again.

use std::path::{Path, PathBuf};

use testgrid_core::{Workbook, Worksheet, MAX_COLS};

use crate::error::{Error, Result};
use crate::value::Value;
use crate::WorkbookExt;

/// Default sheet name for results workbooks
pub const RESULTS_SHEET: &str = "TestResults";

/// Text written in place of any value that is not text.
///
/// Numbers and absent values are not stringified; every one of them lands
/// in the sheet as this literal. Callers that need the number should format
/// it themselves before appending.
pub const NON_TEXT_PLACEHOLDER: &str = "String";

/// Options for writing results workbooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Sheet created by the header writer and required by the row appender
    pub sheet_name: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            sheet_name: RESULTS_SHEET.to_string(),
        }
    }
}

impl WriterOptions {
    pub fn with_sheet_name<S: Into<String>>(mut self, name: S) -> Self {
        self.sheet_name = name.into();
        self
    }
}

fn column(index: usize) -> Result<u16> {
    let col = u16::try_from(index).unwrap_or(u16::MAX);
    if col >= MAX_COLS {
        return Err(testgrid_core::Error::ColumnOutOfBounds(col, MAX_COLS - 1).into());
    }
    Ok(col)
}

fn cell_text(value: Value) -> String {
    match value {
        Value::Text(s) => s,
        Value::Number(_) | Value::Absent => NON_TEXT_PLACEHOLDER.to_string(),
    }
}

/// Create a results workbook at `path` holding only a header row.
///
/// Any existing file at `path` is replaced. Returns `path`.
///
/// ```no_run
/// let path = testgrid::write_header("results.xlsx", ["Case", "Outcome"])?;
/// testgrid::append_row(&path, ["login", "pass"])?;
/// # Ok::<(), testgrid::Error>(())
/// ```
pub fn write_header<P, I, S>(path: P, names: I) -> Result<PathBuf>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    write_header_with(path, names, &WriterOptions::default())
}

/// [`write_header`] with explicit options
pub fn write_header_with<P, I, S>(path: P, names: I, options: &WriterOptions) -> Result<PathBuf>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let path = path.as_ref();

    let mut sheet = Worksheet::new(options.sheet_name.as_str());
    let header = sheet.create_row(0)?;
    for (i, name) in names.into_iter().enumerate() {
        let name: String = name.into();
        header.set_cell_value(column(i)?, name)?;
    }
    let width = header.physical_cell_count();

    let mut workbook = Workbook::new();
    workbook.add_existing_worksheet(sheet)?;
    workbook.save(path)?;

    log::info!(
        "wrote header ({} columns) to {} [{}]",
        width,
        path.display(),
        options.sheet_name
    );
    Ok(path.to_path_buf())
}

/// Append one row after the last row of the results sheet in `path`.
///
/// Text values are written as they are; any other value is written as
/// [`NON_TEXT_PLACEHOLDER`]. Cells start at column A.
pub fn append_row<P, I, V>(path: P, values: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    append_row_with(path, values, &WriterOptions::default())
}

/// [`append_row`] with explicit options
pub fn append_row_with<P, I, V>(path: P, values: I, options: &WriterOptions) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let path = path.as_ref();
    let mut workbook = Workbook::open(path)?;

    let sheet = workbook
        .worksheet_by_name_mut(&options.sheet_name)
        .ok_or_else(|| Error::MissingSheet(options.sheet_name.clone()))?;

    // last_row_num is 0 for a sheet without rows, so its first row is 1
    let last_row = sheet.last_row_num();
    let new_row = last_row + 1;
    log::debug!("last row: {}, new row: {}", last_row, new_row);

    let row = sheet.create_row(new_row)?;
    for (i, value) in values.into_iter().enumerate() {
        row.set_cell_value(column(i)?, cell_text(value.into()))?;
    }

    workbook.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(Value::text("ok")), "ok");
        assert_eq!(cell_text(Value::text("")), "");
        assert_eq!(cell_text(Value::Number(3.14)), NON_TEXT_PLACEHOLDER);
        assert_eq!(cell_text(Value::Absent), NON_TEXT_PLACEHOLDER);
    }

    #[test]
    fn test_column_limit() {
        assert_eq!(column(0).unwrap(), 0);
        assert_eq!(column(16_383).unwrap(), 16_383);
        assert!(column(16_384).is_err());
        assert!(column(usize::MAX).is_err());
    }

    #[test]
    fn test_options() {
        assert_eq!(WriterOptions::default().sheet_name, "TestResults");
        assert_eq!(
            WriterOptions::default().with_sheet_name("Run 7").sheet_name,
            "Run 7"
        );
    }
}
