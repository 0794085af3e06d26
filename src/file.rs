// src/file.rs

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rust_xlsxwriter::{ConditionalFormat3ColorScale, Workbook, Worksheet, XlsxError};

use crate::cell::CellValue;
use crate::config::FormatSpec;
use crate::config::options::ColumnRef;
use crate::error::{QueryError, Result};

/// What [`write_spreadsheet`] produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteReport {
    pub path: PathBuf,
    /// Header row included.
    pub rows_written: u32,
    /// A1 ranges that received a color scale, e.g. `D3:D11`.
    pub formatted: Vec<String>,
    /// Conditional formats that could not be applied. Non-fatal: the file
    /// is still saved.
    pub format_failures: Vec<String>,
}

/// One color-scale target: zero-based sheet coordinates plus its A1 label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatRange {
    pub column: ColumnRef,
    pub first_row: u32,
    pub last_row: u32,
}

impl FormatRange {
    pub fn a1(&self) -> String {
        let col = self.column.letters();
        format!("{col}{}:{col}{}", self.first_row + 1, self.last_row + 1)
    }
}

/// Ranges for `format` over a sheet holding a header plus `data_rows` rows.
///
/// Each runs from `start_row` down to the last written row (`data_rows + 1`,
/// 1-based). Columns whose range would be empty are left out.
pub fn format_ranges(format: &FormatSpec, data_rows: usize) -> Vec<FormatRange> {
    let last = data_rows as u32; // zero-based index of the last data row
    let first = format.start_row.saturating_sub(1);
    if first > last {
        debug!(
            "format start row {} is past the last row {}; no formatting",
            format.start_row,
            last + 1
        );
        return Vec::new();
    }
    format
        .columns
        .iter()
        .map(|&column| FormatRange { column, first_row: first, last_row: last })
        .collect()
}

/// Write `headers` and `rows` to a fresh one-sheet workbook at `path`, color
/// the `format` columns, and save, replacing any existing file.
///
/// Rows are written as they are, whatever their width: short rows leave
/// trailing cells blank, long rows run past the last header.
pub fn write_spreadsheet(
    path: &Path,
    headers: &[String],
    rows: &[Vec<CellValue>],
    format: &FormatSpec,
) -> Result<WriteReport> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, heading) in headers.iter().enumerate() {
        sheet.write_string(0, col_index(col)?, heading)?;
    }

    let mut numeric = 0usize;
    for (i, row) in rows.iter().enumerate() {
        let r = u32::try_from(i + 1).map_err(|_| QueryError::Unknown("too many rows".into()))?;
        for (col, value) in row.iter().enumerate() {
            numeric += !matches!(value, CellValue::Text(_)) as usize;
            write_cell(sheet, r, col_index(col)?, value)?;
        }
    }
    debug!("{numeric} numeric cells");

    let mut report = WriteReport {
        path: path.to_path_buf(),
        rows_written: rows.len() as u32 + 1,
        ..WriteReport::default()
    };

    apply_formats(sheet, &format_ranges(format, rows.len()), &mut report);

    workbook.save(path).map_err(|e| match e {
        XlsxError::IoError(source) => QueryError::FileLocked { path: path.to_path_buf(), source },
        other => QueryError::from(other),
    })?;

    info!(
        "wrote {} ({} rows, {} formatted ranges)",
        path.display(),
        report.rows_written,
        report.formatted.len()
    );
    Ok(report)
}

fn col_index(col: usize) -> Result<u16> {
    u16::try_from(col)
        .ok()
        .and_then(ColumnRef::from_index)
        .map(ColumnRef::index)
        .ok_or_else(|| QueryError::Unknown(format!("column {col} is past the sheet edge")))
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: &CellValue) -> Result<()> {
    match value {
        CellValue::Number(v) => {
            sheet.write_number(row, col, *v)?;
        }
        CellValue::Integer(v) => {
            sheet.write_number(row, col, *v as f64)?;
        }
        // Empty text stays a blank cell.
        CellValue::Text(s) if s.is_empty() => {}
        CellValue::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

/// Color each range, recording in `report` which took and which didn't.
fn apply_formats(sheet: &mut Worksheet, ranges: &[FormatRange], report: &mut WriteReport) {
    for range in ranges {
        match apply_color_scale(sheet, range) {
            Ok(()) => report.formatted.push(range.a1()),
            Err(e) => {
                warn!("could not format {}: {e}", range.a1());
                report.format_failures.push(format!("{}: {e}", range.a1()));
            }
        }
    }
}

fn apply_color_scale(sheet: &mut Worksheet, range: &FormatRange) -> std::result::Result<(), XlsxError> {
    let col = range.column.index();
    sheet.add_conditional_format(
        range.first_row,
        col,
        range.last_row,
        col,
        &ConditionalFormat3ColorScale::new(),
    )?;
    Ok(())
}

/// Hand the saved file to whatever the desktop opens `.xlsx` with.
pub fn open_spreadsheet(path: &Path) -> Result<()> {
    let abs = std::path::absolute(path)
        .map_err(|e| QueryError::Unknown(format!("cannot resolve {}: {e}", path.display())))?;
    info!("opening {}", abs.display());
    open::that(&abs).map_err(|e| QueryError::Unknown(format!("could not open {}: {e}", abs.display())))
}
