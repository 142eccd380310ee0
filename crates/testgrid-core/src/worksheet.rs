//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellValue};
use crate::error::{Error, Result};
use crate::row::Row;
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Rows keyed by 0-based index
    rows: BTreeMap<u32, Row>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Rows ===

    /// Index of the last row that exists (0-based).
    ///
    /// Returns 0 both for a sheet without rows and for a sheet whose only
    /// row is row 0.
    pub fn last_row_num(&self) -> u32 {
        self.rows.keys().next_back().copied().unwrap_or(0)
    }

    /// Number of rows that exist
    pub fn physical_row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a row, or `None` when the row does not exist
    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows.get(&index)
    }

    /// Create an empty row at `index`, replacing any row already there.
    pub fn create_row(&mut self, index: u32) -> Result<&mut Row> {
        if index >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(index, MAX_ROWS - 1));
        }
        let row = self.rows.entry(index).or_insert_with(|| Row::new(index));
        *row = Row::new(index);
        Ok(row)
    }

    /// Get the row at `index`, creating it if it does not exist
    pub fn row_or_create(&mut self, index: u32) -> Result<&mut Row> {
        if index >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(index, MAX_ROWS - 1));
        }
        Ok(self.rows.entry(index).or_insert_with(|| Row::new(index)))
    }

    /// Iterate over existing rows in index order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    // === Cells ===

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.rows.get(&row).and_then(|r| r.cell(col))
    }

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellValue>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Set a cell value by row and column indices, creating the row if needed
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        self.row_or_create(row)?.set_cell_value(col, value)
    }

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Iterate over all cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.rows
            .values()
            .flat_map(|row| row.cells().map(move |(col, value)| (row.index(), col, value)))
    }
}
