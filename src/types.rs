//! Core data model types.
//!
//! Sources produce untyped [`RawTable`]s. The schema registry turns a schema table into
//! [`SchemaField`]s, and the assembler turns data rows into [`Entity`] records grouped into a
//! [`Payload`].

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{EtlError, EtlResult};

/// Numeric sentinel meaning "unknown / not applicable".
pub const SENTINEL: f64 = -1.0;

/// Declared data type of a schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    /// Whole number (fractional input is truncated).
    Int,
    /// Floating point number, rounded to 6 decimals.
    Float,
    /// Money amount, rounded to 2 decimals.
    Currency,
    /// Boolean flag.
    Boolean,
    /// Free text.
    String,
    /// Delimited list, kept as text.
    List,
}

impl DataType {
    /// Parse a declared type name (case-insensitive). Unknown names fall back to
    /// [`DataType::String`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "INT" => Self::Int,
            "FLOAT" => Self::Float,
            "CURRENCY" => Self::Currency,
            "BOOLEAN" => Self::Boolean,
            "LIST" => Self::List,
            _ => Self::String,
        }
    }

    /// Canonical upper-case name, as written in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Currency => "CURRENCY",
            Self::Boolean => "BOOLEAN",
            Self::String => "STRING",
            Self::List => "LIST",
        }
    }
}

/// Opaque role tag for a schema column.
///
/// Only [`LogicType::TARGET`] is interpreted by this crate; every other value is passed through
/// to the payload untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicType(pub String);

impl LogicType {
    /// Tag marking the column that holds an entity's display name.
    pub const TARGET: &'static str = "TARGET";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Whether this is the entity-name column.
    pub fn is_target(&self) -> bool {
        self.0 == Self::TARGET
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Metadata for one attribute column of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    /// Column identifier, unique within a category.
    pub attribute_key: String,
    /// Human-readable column label.
    pub display_label: String,
    /// Declared value type.
    pub data_type: DataType,
    /// Opaque role tag.
    pub logic_type: LogicType,
    /// Free-form rendering hint.
    pub display_format: String,
    /// Whether the column starts collapsed in the UI.
    pub is_folded: bool,
    /// Whether the column is computed rather than read from the data.
    pub is_virtual: bool,
    /// Companion categorical column, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_category_col: Option<String>,
    /// Cell colouring rule, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_color_logic: Option<String>,
}

impl SchemaField {
    /// Create a field with the given key and type; everything else empty/false.
    pub fn new(attribute_key: impl Into<String>, data_type: DataType) -> Self {
        let attribute_key = attribute_key.into();
        Self {
            display_label: attribute_key.clone(),
            attribute_key,
            data_type,
            logic_type: LogicType::default(),
            display_format: String::new(),
            is_folded: false,
            is_virtual: false,
            linked_category_col: None,
            ui_color_logic: None,
        }
    }

    /// Builder-style setter for the logic tag.
    pub fn with_logic(mut self, logic: impl Into<String>) -> Self {
        self.logic_type = LogicType::new(logic);
        self
    }
}

/// A single typed attribute value.
///
/// There is no null variant: absent cells are left out of the [`Entity`] instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer.
    Int(i64),
    /// Float (also used for currency).
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Text (also used for lists).
    Str(String),
}

/// A normalized record: fixed `id`/`name` plus typed attributes in source column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Look up an attribute; `None` means the field is not present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

/// Schema plus entities for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPayload {
    pub schema_config: Vec<SchemaField>,
    pub entities: Vec<Entity>,
}

/// The final output: every successfully processed category, keyed by category name.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub schema_config: IndexMap<String, Vec<SchemaField>>,
    pub categories: IndexMap<String, Vec<Entity>>,
}

impl Payload {
    /// Add a category. Both maps receive the key together so they stay in step.
    pub fn insert(&mut self, category: impl Into<String>, payload: CategoryPayload) {
        let category = category.into();
        self.schema_config
            .insert(category.clone(), payload.schema_config);
        self.categories.insert(category, payload.entities);
    }

    /// Category names in insertion order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(|k| k.as_str())
    }

    /// Serialize with 2-space indentation.
    pub fn to_json_pretty(&self) -> EtlResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the pretty JSON to `path`, creating parent directories as needed.
    pub fn write_json(&self, path: impl AsRef<Path>) -> EtlResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// An untyped table of string cells with a header row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    /// Column names, trimmed.
    pub headers: Vec<String>,
    /// Row-major cells. Short rows are treated as having empty trailing cells.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at (`row`, `column`); missing trailing cells read as `""`.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        let r = self.rows.get(row)?;
        Some(r.get(idx).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Parse a numeric column for binning.
    ///
    /// `$` and `,` are stripped; empty or unparseable cells become `sentinel`. Returns `None` if
    /// the column does not exist.
    pub fn column_f64(&self, column: &str, sentinel: f64) -> Option<Vec<f64>> {
        let idx = self.column_index(column)?;
        Some(
            self.rows
                .iter()
                .map(|r| {
                    r.get(idx)
                        .and_then(|raw| parse_number(raw))
                        .unwrap_or(sentinel)
                })
                .collect(),
        )
    }

    /// Replace a column's cells, appending the column if it does not exist yet.
    ///
    /// Fails with [`EtlError::SchemaMismatch`] when `values.len()` differs from the row
    /// count; the table is left untouched in that case.
    pub fn set_column(&mut self, column: &str, values: Vec<String>) -> EtlResult<()> {
        if values.len() != self.rows.len() {
            return Err(EtlError::SchemaMismatch {
                message: format!(
                    "column '{column}' has {} values for {} rows",
                    values.len(),
                    self.rows.len()
                ),
            });
        }
        let idx = match self.column_index(column) {
            Some(idx) => idx,
            None => {
                self.headers.push(column.to_string());
                self.headers.len() - 1
            }
        };
        for (row, value) in self.rows.iter_mut().zip(values) {
            if row.len() <= idx {
                row.resize(idx + 1, String::new());
            }
            row[idx] = value;
        }
        Ok(())
    }
}

/// Strip currency/grouping characters and parse as `f64`.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
