//! Sheet handle for reading test data

use std::path::Path;

use testgrid_core::{Row, Workbook, Worksheet};

use crate::error::{Error, Result};
use crate::projection::{self, Record};
use crate::value::Value;
use crate::WorkbookExt;

/// One worksheet loaded from a workbook file.
///
/// The file is read completely by [`DataSheet::open`] and closed before it
/// returns; the handle owns the sheet and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSheet {
    worksheet: Worksheet,
}

impl DataSheet {
    /// Open `path` and select the sheet named `sheet_name` (case-sensitive).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use testgrid::DataSheet;
    ///
    /// let sheet = DataSheet::open("data/login.xlsx", "Credentials")?;
    /// for record in sheet.read_records()? {
    ///     println!("{:?}", record.get("username"));
    /// }
    /// # Ok::<(), testgrid::Error>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Self> {
        let path = path.as_ref();
        let workbook = Workbook::open(path)?;

        let worksheet = workbook
            .into_worksheet(sheet_name)
            .ok_or_else(|| Error::MissingSheet(sheet_name.to_string()))?;

        log::debug!(
            "opened sheet '{}' from {} (last row {})",
            sheet_name,
            path.display(),
            worksheet.last_row_num()
        );
        Ok(Self { worksheet })
    }

    /// Wrap a sheet that is already in memory
    pub fn from_worksheet(worksheet: Worksheet) -> Self {
        Self { worksheet }
    }

    /// Index of the last row present (0 for an empty or header-only sheet)
    pub fn row_count(&self) -> u32 {
        self.worksheet.last_row_num()
    }

    pub fn row(&self, index: u32) -> Option<&Row> {
        self.worksheet.row(index)
    }

    /// Physical cell count of a row, 0 when the row does not exist
    pub fn column_count(&self, row: u32) -> usize {
        self.row(row).map_or(0, Row::physical_cell_count)
    }

    /// Positional values of one row; an absent row reads as empty
    pub fn read_row(&self, index: u32) -> Result<Vec<Value>> {
        projection::project_row(self.row(index))
    }

    /// Header-keyed records for rows `1..=row_count`
    pub fn read_records(&self) -> Result<Vec<Record>> {
        projection::read_records(&self.worksheet)
    }

    pub fn worksheet(&self) -> &Worksheet {
        &self.worksheet
    }

    pub fn into_worksheet(self) -> Worksheet {
        self.worksheet
    }
}

/// Open a sheet and read all of its records in one call
pub fn read_records_from<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Vec<Record>> {
    DataSheet::open(path, sheet_name)?.read_records()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> DataSheet {
        let mut ws = Worksheet::new("Data");
        ws.set_cell_value("A1", "user").unwrap();
        ws.set_cell_value("B1", "pin").unwrap();
        ws.set_cell_value("A2", "dana").unwrap();
        ws.set_cell_value("B2", 1234.0).unwrap();
        ws.set_cell_value("A3", "eli").unwrap();
        DataSheet::from_worksheet(ws)
    }

    #[test]
    fn test_counts() {
        let sheet = sample();
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.column_count(0), 2);
        assert_eq!(sheet.column_count(2), 1);
        assert_eq!(sheet.column_count(40), 0);
    }

    #[test]
    fn test_read_row() {
        let sheet = sample();
        assert_eq!(
            sheet.read_row(1).unwrap(),
            vec![Value::text("dana"), Value::Number(1234.0)]
        );
        assert!(sheet.read_row(99).unwrap().is_empty());
    }

    #[test]
    fn test_read_records() {
        let records = sample().read_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["user"], Value::text("eli"));
        assert_eq!(records[1]["pin"], Value::Absent);
    }
}
