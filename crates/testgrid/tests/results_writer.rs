//! End-to-end tests for the results workbook (header -> append -> read back)

use pretty_assertions::assert_eq;
use testgrid::prelude::*;
use testgrid::{
    append_row_with, write_header_with, XlsxReader, XlsxWriter, NON_TEXT_PLACEHOLDER,
};

fn cell_text(sheet: &Worksheet, row: u32, col: u16) -> Option<&str> {
    sheet.cell_at(row, col).and_then(CellValue::as_string)
}

#[test]
fn test_write_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.xlsx");

    let returned = write_header(&path, ["A", "B"]).unwrap();
    assert_eq!(returned, path);

    let sheet = DataSheet::open(&path, "TestResults").unwrap();
    assert_eq!(sheet.row_count(), 0);
    assert_eq!(
        sheet.read_row(0).unwrap(),
        vec![Value::text("A"), Value::text("B")]
    );
}

#[test]
fn test_write_header_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = testgrid::create_results_file_in(dir.path(), "Nightly").unwrap();

    write_header(&path, vec!["Case".to_string()]).unwrap();
    append_row(&path, ["first"]).unwrap();
    write_header(&path, ["Case", "Status"]).unwrap();

    let sheet = DataSheet::open(&path, "TestResults").unwrap();
    assert_eq!(sheet.row_count(), 0);
    assert_eq!(sheet.column_count(0), 2);
}

#[test]
fn test_append_rows_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_header(dir.path().join("run.xlsx"), ["Case", "Status"]).unwrap();

    append_row(&path, ["login", "pass"]).unwrap();
    let sheet = DataSheet::open(&path, "TestResults").unwrap();
    assert_eq!(sheet.row_count(), 1);
    assert_eq!(sheet.column_count(1), 2);

    append_row(&path, ["logout", "fail"]).unwrap();
    let records = testgrid::read_records_from(&path, "TestResults").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Case"], Value::text("login"));
    assert_eq!(records[1]["Case"], Value::text("logout"));
    assert_eq!(records[1]["Status"], Value::text("fail"));
}

#[test]
fn test_non_text_values_are_written_as_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_header(dir.path().join("run.xlsx"), ["Value"]).unwrap();

    append_row(&path, [Value::Number(3.14)]).unwrap();
    append_row(&path, [Value::text("ok"), Value::Absent, Value::Number(1.0)]).unwrap();

    let wb = XlsxReader::read_file(&path).unwrap();
    let sheet = wb.worksheet_by_name("TestResults").unwrap();

    assert_eq!(cell_text(sheet, 1, 0), Some(NON_TEXT_PLACEHOLDER));
    assert_eq!(cell_text(sheet, 2, 0), Some("ok"));
    assert_eq!(cell_text(sheet, 2, 1), Some("String"));
    assert_eq!(cell_text(sheet, 2, 2), Some("String"));
}

#[test]
fn test_append_to_sheet_without_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.xlsx");

    let mut wb = Workbook::new();
    wb.add_worksheet_with_name("TestResults").unwrap();
    XlsxWriter::write_file(&wb, &path).unwrap();

    append_row(&path, ["x", "y"]).unwrap();

    let sheet = DataSheet::open(&path, "TestResults").unwrap();
    assert!(sheet.row(0).is_none());
    assert_eq!(sheet.row_count(), 1);
    assert_eq!(
        sheet.read_row(1).unwrap(),
        vec![Value::text("x"), Value::text("y")]
    );

    // the header row stays absent, so records need row 0
    assert!(matches!(sheet.read_records(), Err(Error::MissingRow(0))));
}

#[test]
fn test_append_empty_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_header(dir.path().join("run.xlsx"), ["Case"]).unwrap();

    append_row(&path, Vec::<Value>::new()).unwrap();
    append_row(&path, ["after"]).unwrap();

    let sheet = DataSheet::open(&path, "TestResults").unwrap();
    assert_eq!(sheet.row_count(), 2);
    assert!(sheet.row(1).unwrap().is_empty());
    assert_eq!(sheet.read_row(2).unwrap(), vec![Value::text("after")]);
}

#[test]
fn test_custom_sheet_name() {
    let dir = tempfile::tempdir().unwrap();
    let options = WriterOptions::default().with_sheet_name("Smoke");
    let path = write_header_with(dir.path().join("smoke.xlsx"), ["Case"], &options).unwrap();

    append_row_with(&path, ["boot"], &options).unwrap();

    let records = testgrid::read_records_from(&path, "Smoke").unwrap();
    assert_eq!(records[0]["Case"], Value::text("boot"));

    let err = append_row(&path, ["boot"]).unwrap_err();
    assert!(matches!(err, Error::MissingSheet(ref name) if name == "TestResults"));
}

#[test]
fn test_failed_append_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let options = WriterOptions::default().with_sheet_name("Other");
    let path = write_header_with(dir.path().join("run.xlsx"), ["Case"], &options).unwrap();
    let before = std::fs::read(&path).unwrap();

    assert!(matches!(
        append_row(&path, ["x"]),
        Err(Error::MissingSheet(_))
    ));

    let too_wide = vec!["x"; 16_385];
    assert!(matches!(
        append_row_with(&path, too_wide, &options),
        Err(Error::Core(_))
    ));

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_append_to_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never-created.xlsx");

    assert!(matches!(
        append_row(&path, ["x"]),
        Err(Error::NotFound { .. })
    ));
    assert!(!path.exists());
}

#[test]
fn test_append_to_non_workbook_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.xlsx");
    std::fs::write(&path, b"plain text log").unwrap();

    assert!(matches!(
        append_row(&path, ["x"]),
        Err(Error::Format { .. })
    ));
    assert_eq!(std::fs::read(&path).unwrap(), b"plain text log");
}

#[test]
fn test_write_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("results.xlsx");

    let err = write_header(&path, ["A"]).unwrap_err();
    match err {
        Error::Write { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Write, got {other:?}"),
    }
}

#[test]
fn test_write_over_directory_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("results.xlsx");
    std::fs::create_dir(&target).unwrap();

    assert!(matches!(
        write_header(&target, ["A"]),
        Err(Error::Write { .. })
    ));

    assert!(target.is_dir());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_invalid_sheet_name() {
    let dir = tempfile::tempdir().unwrap();
    let options = WriterOptions::default().with_sheet_name("Q1/Q2");

    let err = write_header_with(dir.path().join("bad.xlsx"), ["A"], &options).unwrap_err();
    assert!(matches!(err, Error::Core(_)), "got {err:?}");
    assert!(!dir.path().join("bad.xlsx").exists());
}
