//! Format dispatch for path-based tables.
//!
//! Most callers should use [`read_table_from_path`], which picks a reader from the file extension
//! unless a [`SourceFormat`] is forced.

use std::path::Path;

use crate::error::{EtlError, EtlResult};
use crate::types::RawTable;

use super::{csv, json};

/// Supported table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Comma-separated values.
    Csv,
    /// JSON array-of-objects or a `{"values": [[...]]}` range.
    Json,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
}

impl SourceFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Infer the format of `path` from its extension.
    pub fn from_path(path: &Path) -> EtlResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| EtlError::SchemaMismatch {
                message: format!("cannot infer format: path has no extension ({})", path.display()),
            })?;

        Self::from_extension(ext).ok_or_else(|| EtlError::SchemaMismatch {
            message: format!(
                "cannot infer format from extension '{ext}' for path ({})",
                path.display()
            ),
        })
    }
}

/// Read a table from `path`.
///
/// - If `format` is `None`, the format is inferred from the file extension.
/// - `sheet` only applies to workbooks; `None` reads the first sheet.
///
/// ```no_run
/// use scalar_data::ingestion::read_table_from_path;
///
/// # fn main() -> Result<(), scalar_data::EtlError> {
/// let table = read_table_from_path("data/countries_enriched.csv", None, None)?;
/// println!("rows={}", table.row_count());
/// # Ok(())
/// # }
/// ```
pub fn read_table_from_path(
    path: impl AsRef<Path>,
    format: Option<SourceFormat>,
    sheet: Option<&str>,
) -> EtlResult<RawTable> {
    let path = path.as_ref();
    let fmt = match format {
        Some(f) => f,
        None => SourceFormat::from_path(path)?,
    };

    match fmt {
        SourceFormat::Csv => csv::read_csv_table_from_path(path),
        SourceFormat::Json => json::read_json_table_from_path(path),
        SourceFormat::Excel => read_excel_dispatch(path, sheet),
    }
}

fn read_excel_dispatch(path: &Path, sheet: Option<&str>) -> EtlResult<RawTable> {
    let _ = (path, sheet);

    #[cfg(feature = "excel")]
    {
        super::excel::read_excel_table_from_path(path, sheet)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(EtlError::SchemaMismatch {
            message: "excel sources not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}
