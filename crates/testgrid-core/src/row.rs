//! Row type

use std::collections::BTreeMap;

use crate::cell::CellValue;
use crate::error::{Error, Result};
use crate::MAX_COLS;

/// A row of cells at a fixed index within a worksheet.
///
/// Cells are stored sparsely. A row can exist without any cells, which is
/// how a `<row r="5"/>` element or a freshly created row is represented.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    index: u32,
    cells: BTreeMap<u16, CellValue>,
}

impl Row {
    /// Create a new, empty row
    pub fn new(index: u32) -> Self {
        Self {
            index,
            cells: BTreeMap::new(),
        }
    }

    /// Row index (0-based)
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Get the cell at a column, or `None` when no cell exists there
    pub fn cell(&self, col: u16) -> Option<&CellValue> {
        self.cells.get(&col)
    }

    /// Create a blank cell at `col`, replacing any existing cell.
    pub fn create_cell(&mut self, col: u16) -> Result<&mut CellValue> {
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        let cell = self.cells.entry(col).or_default();
        *cell = CellValue::Blank;
        Ok(cell)
    }

    /// Set a cell value, creating the cell if needed
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, col: u16, value: V) -> Result<()> {
        *self.create_cell(col)? = value.into();
        Ok(())
    }

    /// Number of cells that exist in this row.
    ///
    /// Gaps are not counted, so for cells at A and C this is 2.
    pub fn physical_cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over `(column, value)` pairs in column order
    pub fn cells(&self) -> impl Iterator<Item = (u16, &CellValue)> {
        self.cells.iter().map(|(col, value)| (*col, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_count_ignores_gaps() {
        let mut row = Row::new(3);
        row.set_cell_value(0, "a").unwrap();
        row.set_cell_value(2, 1.5).unwrap();

        assert_eq!(row.index(), 3);
        assert_eq!(row.physical_cell_count(), 2);
        assert!(row.cell(1).is_none());
        assert_eq!(row.cell(2), Some(&CellValue::Number(1.5)));
    }

    #[test]
    fn test_create_cell_is_blank() {
        let mut row = Row::new(0);
        row.set_cell_value(0, "old").unwrap();
        assert_eq!(row.create_cell(0).unwrap(), &mut CellValue::Blank);
        assert_eq!(row.physical_cell_count(), 1);
    }

    #[test]
    fn test_column_bounds() {
        let mut row = Row::new(0);
        assert!(row.create_cell(MAX_COLS).is_err());
        assert!(row.is_empty());
    }
}
