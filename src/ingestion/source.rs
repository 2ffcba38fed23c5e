//! Where a category's schema and data tables come from.
//!
//! The payload builder only talks to [`TabularSource`]; files on disk ([`FileSource`]) and
//! in-memory tables ([`MemorySource`]) are the two stock implementations.

use std::path::{Path, PathBuf};

use crate::error::{EtlError, EtlResult, SourceRole};
use crate::types::RawTable;

use super::unified::{read_table_from_path, SourceFormat};

/// A provider of one category's schema table and data table.
pub trait TabularSource: Send + Sync {
    /// The per-column metadata rows.
    fn schema_table(&self) -> EtlResult<RawTable>;

    /// The entity rows.
    fn data_table(&self) -> EtlResult<RawTable>;

    /// Short description used in log lines.
    fn describe(&self) -> String;
}

/// A category backed by two files.
#[derive(Debug, Clone)]
pub struct FileSource {
    category: String,
    schema_path: PathBuf,
    data_path: PathBuf,
    format: Option<SourceFormat>,
    sheet: Option<String>,
}

impl FileSource {
    /// Create a source; the format of each file is inferred from its extension.
    pub fn new(
        category: impl Into<String>,
        schema_path: impl Into<PathBuf>,
        data_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            category: category.into(),
            schema_path: schema_path.into(),
            data_path: data_path.into(),
            format: None,
            sheet: None,
        }
    }

    /// The conventional `<key>_schema_config.csv` / `<key>_enriched.csv` pair under `dir`.
    pub fn conventional(dir: impl AsRef<Path>, key: &str) -> Self {
        let dir = dir.as_ref();
        Self::new(
            key,
            dir.join(format!("{key}_schema_config.csv")),
            dir.join(format!("{key}_enriched.csv")),
        )
    }

    /// Force a format for both files instead of inferring it.
    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Read a named sheet when the files are workbooks.
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    fn read(&self, role: SourceRole) -> EtlResult<RawTable> {
        let path = match role {
            SourceRole::Schema => &self.schema_path,
            SourceRole::Data => &self.data_path,
        };
        if !path.exists() {
            return Err(EtlError::MissingSource {
                category: self.category.clone(),
                role,
                path: path.clone(),
            });
        }
        read_table_from_path(path, self.format, self.sheet.as_deref())
    }
}

impl TabularSource for FileSource {
    fn schema_table(&self) -> EtlResult<RawTable> {
        self.read(SourceRole::Schema)
    }

    fn data_table(&self) -> EtlResult<RawTable> {
        self.read(SourceRole::Data)
    }

    fn describe(&self) -> String {
        format!(
            "schema={} data={}",
            self.schema_path.display(),
            self.data_path.display()
        )
    }
}

/// A category whose tables are already in memory. Mostly useful in tests and when the rows
/// come from an enrichment step rather than a file.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    schema: RawTable,
    data: Option<RawTable>,
}

impl MemorySource {
    pub fn new(schema: RawTable, data: RawTable) -> Self {
        Self {
            schema,
            data: Some(data),
        }
    }

    /// A source with a schema but no data table; reading data fails like a missing file.
    pub fn schema_only(schema: RawTable) -> Self {
        Self { schema, data: None }
    }
}

impl TabularSource for MemorySource {
    fn schema_table(&self) -> EtlResult<RawTable> {
        Ok(self.schema.clone())
    }

    fn data_table(&self) -> EtlResult<RawTable> {
        self.data.clone().ok_or_else(|| EtlError::MissingSource {
            category: "<memory>".to_string(),
            role: SourceRole::Data,
            path: PathBuf::from("<memory>"),
        })
    }

    fn describe(&self) -> String {
        match &self.data {
            Some(d) => format!("memory rows={}", d.row_count()),
            None => "memory rows=<none>".to_string(),
        }
    }
}
