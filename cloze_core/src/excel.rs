//! Spreadsheet decoding for uploaded drill files (Excel, ODS and CSV)

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;

use crate::error::{DrillError, DrillResult};

/// One decoded spreadsheet row, every cell rendered to text
pub type Row = Vec<String>;

/// Decoder selected from the upload's file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Workbook,
    Csv,
}

impl SheetFormat {
    pub fn from_file_name(file_name: &str) -> DrillResult<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SheetFormat::Workbook),
            "csv" => Ok(SheetFormat::Csv),
            _ => Err(DrillError::UnsupportedFormat(extension)),
        }
    }
}

/// Decode uploaded bytes into rows. The header row is returned as row 0.
pub fn read_rows(file_name: &str, bytes: &[u8]) -> DrillResult<Vec<Row>> {
    let rows = match SheetFormat::from_file_name(file_name)? {
        SheetFormat::Workbook => read_workbook(bytes)?,
        SheetFormat::Csv => read_csv(bytes)?,
    };
    log::debug!("Decoded {} rows from '{}'", rows.len(), file_name);
    Ok(rows)
}

/// Read a spreadsheet from disk
pub fn read_rows_from_path(path: impl AsRef<Path>) -> DrillResult<Vec<Row>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    read_rows(file_name, &bytes)
}

/// First sheet of an xlsx/xls/xlsb/ods workbook
fn read_workbook(bytes: &[u8]) -> DrillResult<Vec<Row>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .ok_or(DrillError::EmptyWorkbook)?
        .clone();

    let range = workbook.worksheet_range(&sheet_name)?;

    // The range covers only the used area. Columns are positional, so pad
    // back to column A. Blank lines above the used area are dropped, the
    // same way the CSV reader skips empty lines, leaving the header first.
    let first_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    Ok(range
        .rows()
        .map(|row| {
            let cells = std::iter::repeat_with(String::new)
                .take(first_col)
                .chain(row.iter().map(get_cell_string))
                .collect();
            trim_trailing_empty(cells)
        })
        .collect())
}

fn read_csv(bytes: &[u8]) -> DrillResult<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(trim_trailing_empty(
            record.iter().map(|s| s.to_string()).collect(),
        ));
    }
    Ok(rows)
}

/// Blank lines in a sheet come back as full-width runs of empty cells;
/// dropping the tail turns them into zero-cell rows.
fn trim_trailing_empty(mut row: Row) -> Row {
    while row.last().is_some_and(|cell| cell.is_empty()) {
        row.pop();
    }
    row
}

/// Cells are kept verbatim: edge line breaks in the question column matter.
fn get_cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
        Data::Empty => String::new(),
    }
}
