// tests/write_xlsx.rs
//
// Write workbooks with file::write_spreadsheet and read them back.
//
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use web_query::cell::{normalize_row, CellValue};
use web_query::config::FormatSpec;
use web_query::file::write_spreadsheet;

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn sheet(path: &Path) -> calamine::Range<Data> {
    let mut wb: Xlsx<_> = open_workbook(path).unwrap();
    wb.worksheet_range("Sheet1").unwrap()
}

fn sheet_xml(path: &Path) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut xml = String::new();
    archive
        .by_name("xl/worksheets/sheet1.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

fn out(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("DataQuery.xlsx")
}

#[test]
fn first_row_is_the_header_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = out(&dir);
    let headers = strings(&["Occupation code", "Occupation title", "Employment", "Mean wage"]);
    let rows = vec![normalize_row(&strings(&["11-1011", "Chief Executives", "200,480", "$213,020"]))];

    write_spreadsheet(&path, &headers, &rows, &FormatSpec::default()).unwrap();

    let range = sheet(&path);
    let first: Vec<Data> = range.rows().next().unwrap().to_vec();
    let expected: Vec<Data> = headers.iter().cloned().map(Data::String).collect();
    assert_eq!(first, expected);
}

#[test]
fn row_count_is_data_plus_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = out(&dir);
    let rows: Vec<Vec<CellValue>> = (0..10)
        .map(|i| vec![CellValue::Text(format!("row {i}")), CellValue::Number(i as f64)])
        .collect();

    let report = write_spreadsheet(&path, &strings(&["Name", "N"]), &rows, &FormatSpec::none()).unwrap();

    assert_eq!(sheet(&path).height(), 11);
    assert_eq!(report.rows_written, 11);
}

#[test]
fn normalized_values_land_as_numbers_and_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = out(&dir);
    let rows = vec![normalize_row(&strings(&["12kg", "3.5cm", "1.2.3", "n/a"]))];
    assert_eq!(
        rows[0],
        [
            CellValue::Number(12.0),
            CellValue::Number(3.5),
            CellValue::Integer(123),
            CellValue::Text("n/a".into())
        ]
    );

    write_spreadsheet(&path, &strings(&["A", "B", "C", "D"]), &rows, &FormatSpec::none()).unwrap();

    let range = sheet(&path);
    let data: Vec<Data> = range.rows().nth(1).unwrap().to_vec();
    assert_eq!(
        data,
        [Data::Float(12.0), Data::Float(3.5), Data::Float(123.0), Data::String("n/a".into())]
    );
}

#[test]
fn color_scale_ranges_follow_row_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = out(&dir);
    let rows = vec![vec![CellValue::Number(1.0); 5]; 10];
    let format = FormatSpec { columns: FormatSpec::parse_columns("D,E").unwrap(), start_row: 3 };

    let report = write_spreadsheet(&path, &strings(&["A", "B", "C", "D", "E"]), &rows, &format).unwrap();
    assert_eq!(report.formatted, ["D3:D11", "E3:E11"]);

    let xml = sheet_xml(&path);
    assert!(xml.contains(r#"sqref="D3:D11""#), "{xml}");
    assert!(xml.contains(r#"sqref="E3:E11""#), "{xml}");
    assert_eq!(xml.matches(r#"type="colorScale""#).count(), 2);
    // Three-point scale: min, percentile, max.
    assert_eq!(xml.matches("<cfvo").count(), 6);
}

#[test]
fn no_conditional_formats_without_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = out(&dir);
    let rows = vec![vec![CellValue::Number(1.0)]; 4];

    write_spreadsheet(&path, &strings(&["A"]), &rows, &FormatSpec::none()).unwrap();
    assert!(!sheet_xml(&path).contains("conditionalFormatting"));
}

#[test]
fn ragged_rows_are_written_as_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = out(&dir);
    let rows = vec![
        vec![CellValue::Number(1.0)],
        vec![CellValue::Number(1.0), CellValue::Number(2.0), CellValue::Text("extra".into())],
    ];

    write_spreadsheet(&path, &strings(&["A", "B"]), &rows, &FormatSpec::none()).unwrap();

    let range = sheet(&path);
    assert_eq!(range.width(), 3);
    let all: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();
    assert_eq!(all[1], [Data::Float(1.0), Data::Empty, Data::Empty]);
    assert_eq!(all[2], [Data::Float(1.0), Data::Float(2.0), Data::String("extra".into())]);
}

#[test]
fn empty_text_cells_stay_blank() {
    let dir = tempfile::tempdir().unwrap();
    let path = out(&dir);
    let rows = vec![normalize_row(&strings(&["", "x"]))];

    write_spreadsheet(&path, &strings(&["A", "B"]), &rows, &FormatSpec::none()).unwrap();

    let all: Vec<Vec<Data>> = sheet(&path).rows().map(|r| r.to_vec()).collect();
    assert_eq!(all[1], [Data::Empty, Data::String("x".into())]);
}

#[test]
fn existing_file_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = out(&dir);
    std::fs::write(&path, b"stale").unwrap();

    write_spreadsheet(&path, &strings(&["Fresh"]), &[], &FormatSpec::none()).unwrap();

    let first: Vec<Data> = sheet(&path).rows().next().unwrap().to_vec();
    assert_eq!(first, [Data::String("Fresh".into())]);
}
