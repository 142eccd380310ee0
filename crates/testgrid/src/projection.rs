//! Row and record projection
//!
//! [`project_row`] turns one row into positional values. [`read_records`]
//! treats row 0 as a header and turns every later row into a [`Record`]
//! keyed by header text.

use indexmap::IndexMap;
use testgrid_core::{CellAddress, Row, Worksheet};

use crate::error::{Error, Result};
use crate::value::{coerce, Value};

/// One data row keyed by header text, in header order.
///
/// When the header repeats a name the key keeps its first position and
/// holds the value of the last column carrying that name.
pub type Record = IndexMap<String, Value>;

fn coerce_at(row: &Row, col: u16) -> Result<Value> {
    coerce(row.cell(col)).map_err(|kind| Error::UnsupportedCellKind {
        row: row.index(),
        col,
        kind,
    })
}

/// Project a row into its coerced values.
///
/// A missing row projects to an empty list. Otherwise the list has one
/// entry per physical cell, taken from columns `0..count`; a gap inside that
/// span reads as [`Value::Absent`].
pub fn project_row(row: Option<&Row>) -> Result<Vec<Value>> {
    let Some(row) = row else {
        log::debug!("projected 0 values (no row)");
        return Ok(Vec::new());
    };

    let count = row.physical_cell_count();
    let mut values = Vec::with_capacity(count);
    for col in (0..count).map_while(|c| u16::try_from(c).ok()) {
        values.push(coerce_at(row, col)?);
    }

    log::debug!("projected {} values from row {}", values.len(), row.index());
    Ok(values)
}

/// Header names from the string cells of a row, left to right.
///
/// Only columns `0..physical count` are scanned. Non-string cells and gaps
/// are skipped rather than padded, so the header can be shorter than the
/// row. Duplicates are kept. A string cell past the scanned span (one that
/// sits to the right of a gap) is left out and logged at `warn`.
pub fn read_header(row: &Row) -> Vec<String> {
    let span = row.physical_cell_count();

    let mut header = Vec::with_capacity(span);
    for (col, cell) in row.cells() {
        let Some(name) = cell.as_string() else {
            continue;
        };
        if usize::from(col) < span {
            header.push(name.to_string());
        } else {
            log::warn!(
                "header cell {} ({:?}) lies past {} physical cells and is ignored",
                CellAddress::new(row.index(), col),
                name,
                span
            );
        }
    }
    header
}

/// Read every data row of a sheet as a header-keyed [`Record`].
///
/// Returns an empty list when the last row index is 0 (empty or header-only
/// sheet). Otherwise one record is built per row `1..=last_row_num`; a row
/// missing from that range is [`Error::MissingRow`].
pub fn read_records(sheet: &Worksheet) -> Result<Vec<Record>> {
    let row_count = sheet.last_row_num();
    if row_count == 0 {
        return Ok(Vec::new());
    }

    let header_row = sheet.row(0).ok_or(Error::MissingRow(0))?;
    let header = read_header(header_row);
    log::debug!("sheet '{}' header: {:?}", sheet.name(), header);

    let mut records = Vec::with_capacity(row_count as usize);
    for i in 1..=row_count {
        let row = sheet.row(i).ok_or(Error::MissingRow(i))?;

        let mut record = Record::with_capacity(header.len());
        for (j, name) in header.iter().enumerate() {
            let value = match u16::try_from(j) {
                Ok(col) => coerce_at(row, col)?,
                Err(_) => Value::Absent,
            };
            record.insert(name.clone(), value);
        }
        records.push(record);
    }

    Ok(records)
}
