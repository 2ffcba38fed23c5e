//! CSV reading and writing for [`RawTable`]s.

use std::path::Path;

use crate::error::{EtlError, EtlResult};
use crate::types::RawTable;

/// Read a CSV file into a [`RawTable`].
///
/// Rules:
///
/// - CSV must have headers; header names are trimmed.
/// - Rows may be shorter or longer than the header (`flexible`); missing cells read as empty.
/// - Cells are kept verbatim (no trimming); typing happens later.
pub fn read_csv_table_from_path(path: impl AsRef<Path>) -> EtlResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    read_csv_table_from_reader(&mut rdr)
}

/// Read CSV data from an existing CSV reader.
pub fn read_csv_table_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> EtlResult<RawTable> {
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(EtlError::SchemaMismatch {
            message: "csv input has no header row".to_string(),
        });
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// Write a [`RawTable`] as CSV, header first. Short rows are padded with empty cells.
pub fn write_csv_table_to_path(table: &RawTable, path: impl AsRef<Path>) -> EtlResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_csv_table(table, &mut wtr)?;
    wtr.flush()?;
    Ok(())
}

/// Write a [`RawTable`] to an existing CSV writer.
pub fn write_csv_table<W: std::io::Write>(table: &RawTable, wtr: &mut csv::Writer<W>) -> EtlResult<()> {
    wtr.write_record(&table.headers)?;
    let width = table.headers.len();
    for row in &table.rows {
        let cells = (0..width).map(|i| row.get(i).map(|s| s.as_str()).unwrap_or(""));
        wtr.write_record(cells)?;
    }
    Ok(())
}
