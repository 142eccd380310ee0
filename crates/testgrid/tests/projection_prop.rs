use std::io::Cursor;

use proptest::prelude::*;
use testgrid::{
    coerce, project_row, read_records, CellValue, Value, Workbook, Worksheet, XlsxReader,
    XlsxWriter,
};

fn supported_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        "[ -~]{0,12}".prop_map(CellValue::String),
        (-1e12f64..1e12).prop_map(CellValue::Number),
        Just(CellValue::Blank),
    ]
}

/// Row of up to 8 slots, each either empty or holding a supported cell
fn sparse_row() -> impl Strategy<Value = Vec<Option<CellValue>>> {
    proptest::collection::vec(proptest::option::of(supported_cell()), 0..8)
}

fn build_sheet(rows: &[Vec<Option<CellValue>>]) -> Worksheet {
    let mut sheet = Worksheet::new("Data");
    for (r, cells) in rows.iter().enumerate() {
        let row = sheet.create_row(r as u32).unwrap();
        for (c, cell) in cells.iter().enumerate() {
            if let Some(value) = cell {
                row.set_cell_value(c as u16, value.clone()).unwrap();
            }
        }
    }
    sheet
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_coercion_is_total(cell in proptest::option::of(supported_cell())) {
        let value = coerce(cell.as_ref());
        let expected = match &cell {
            None => Value::Absent,
            Some(CellValue::String(s)) => Value::Text(s.clone()),
            Some(CellValue::Number(n)) => Value::Number(*n),
            Some(_) => Value::Text(String::new()),
        };
        prop_assert_eq!(value, Ok(expected));
    }

    #[test]
    fn prop_projection_length_is_physical_count(cells in sparse_row()) {
        let sheet = build_sheet(&[cells]);
        let row = sheet.row(0);

        let values = project_row(row).unwrap();
        prop_assert_eq!(values.len(), row.map_or(0, |r| r.physical_cell_count()));
        prop_assert!(project_row(None).unwrap().is_empty());
    }

    #[test]
    fn prop_one_record_per_data_row(rows in proptest::collection::vec(sparse_row(), 1..10)) {
        let sheet = build_sheet(&rows);
        let records = read_records(&sheet).unwrap();

        prop_assert_eq!(records.len(), rows.len() - 1);

        let header = testgrid::read_header(sheet.row(0).unwrap());
        for record in &records {
            prop_assert!(record.len() <= header.len());
            for name in &header {
                prop_assert!(record.contains_key(name));
            }
        }
    }

    #[test]
    fn prop_records_survive_xlsx_roundtrip(rows in proptest::collection::vec(sparse_row(), 1..6)) {
        let mut wb = Workbook::new();
        wb.add_existing_worksheet(build_sheet(&rows)).unwrap();

        let bytes = XlsxWriter::to_bytes(&wb).unwrap();
        let wb2 = XlsxReader::read(Cursor::new(bytes)).unwrap();

        let before = read_records(wb.worksheet(0).unwrap()).unwrap();
        let after = read_records(wb2.worksheet(0).unwrap()).unwrap();
        prop_assert_eq!(before, after);
    }
}
