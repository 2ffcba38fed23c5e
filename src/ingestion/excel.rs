#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{EtlError, EtlResult};
use crate::types::RawTable;

/// Read one sheet of a workbook (`.xlsx`, `.xls`, `.ods`, etc.) into a [`RawTable`].
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Renders every remaining cell as text (integral numbers without a fractional part)
pub fn read_excel_table_from_path(path: impl AsRef<Path>, sheet_name: Option<&str>) -> EtlResult<RawTable> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| EtlError::SchemaMismatch {
                message: "workbook has no sheets".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    sheet_range_to_table(&range).map_err(|e| wrap_schema_err_with_sheet(&sheet, e))
}

fn sheet_range_to_table(range: &calamine::Range<Data>) -> EtlResult<RawTable> {
    let mut rows = range.rows();

    let headers: Vec<String> = loop {
        match rows.next() {
            Some(row) if row.iter().any(|c| !matches!(c, Data::Empty)) => {
                break row.iter().map(|c| cell_to_string(c).trim().to_string()).collect();
            }
            Some(_) => continue,
            None => {
                return Err(EtlError::SchemaMismatch {
                    message: "sheet has no non-empty rows (no header row found)".to_string(),
                });
            }
        }
    };

    let body = rows
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(RawTable::new(headers, body))
}

fn wrap_schema_err_with_sheet(sheet: &str, err: EtlError) -> EtlError {
    match err {
        EtlError::SchemaMismatch { message } => EtlError::SchemaMismatch {
            message: format!("sheet '{sheet}': {message}"),
        },
        other => other,
    }
}

fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(f) => f.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}
