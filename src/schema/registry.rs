//! Schema table → [`SchemaField`] list.

use std::collections::HashMap;

use crate::error::{EtlError, EtlResult};
use crate::types::{DataType, LogicType, RawTable, SchemaField};

/// Name column used when no field is tagged `TARGET`.
pub const DEFAULT_NAME_COLUMN: &str = "name";

/// Header names of a schema table.
pub mod columns {
    pub const ATTRIBUTE_KEY: &str = "attribute_key";
    pub const DISPLAY_LABEL: &str = "display_label";
    pub const DATA_TYPE: &str = "data_type";
    pub const LOGIC_TYPE: &str = "logic_type";
    pub const DISPLAY_FORMAT: &str = "display_format";
    pub const IS_FOLDED: &str = "is_folded";
    pub const IS_VIRTUAL: &str = "is_virtual";
    pub const LINKED_CATEGORY_COL: &str = "linked_category_col";
    pub const UI_COLOR_LOGIC: &str = "ui_color_logic";

    /// Headers a schema table must have.
    pub const REQUIRED: &[&str] = &[ATTRIBUTE_KEY, DATA_TYPE];
}

/// Parsed, validated schema for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRegistry {
    fields: Vec<SchemaField>,
    by_key: HashMap<String, usize>,
    target: Option<usize>,
}

impl SchemaRegistry {
    /// Build from already-parsed fields.
    ///
    /// Fails if two fields share an `attributeKey` or more than one field is tagged `TARGET`.
    pub fn new(fields: Vec<SchemaField>) -> EtlResult<Self> {
        let mut by_key = HashMap::with_capacity(fields.len());
        let mut target: Option<usize> = None;

        for (idx, field) in fields.iter().enumerate() {
            if by_key.insert(field.attribute_key.clone(), idx).is_some() {
                return Err(EtlError::SchemaMismatch {
                    message: format!("duplicate attribute_key '{}'", field.attribute_key),
                });
            }
            if field.logic_type.is_target() {
                if let Some(prev) = target {
                    return Err(EtlError::SchemaMismatch {
                        message: format!(
                            "more than one TARGET field ('{}' and '{}')",
                            fields[prev].attribute_key, field.attribute_key
                        ),
                    });
                }
                target = Some(idx);
            }
        }

        Ok(Self {
            fields,
            by_key,
            target,
        })
    }

    /// Parse a schema table.
    ///
    /// Rules:
    ///
    /// - `attribute_key` and `data_type` headers are required; the remaining headers are optional
    ///   and default to empty/false.
    /// - Rows with an empty `attribute_key` are skipped.
    /// - Unknown `data_type` values become `STRING`.
    /// - `is_folded` / `is_virtual` are true only for `true` (any case).
    /// - Empty `linked_category_col` / `ui_color_logic` are treated as absent.
    pub fn from_table(table: &RawTable) -> EtlResult<Self> {
        for required in columns::REQUIRED {
            if table.column_index(required).is_none() {
                return Err(EtlError::SchemaMismatch {
                    message: format!(
                        "missing required column '{required}'. headers={:?}",
                        table.headers
                    ),
                });
            }
        }

        let mut fields = Vec::with_capacity(table.row_count());
        for row in 0..table.row_count() {
            let cell = |name: &str| table.get(row, name).unwrap_or("").trim();

            let attribute_key = cell(columns::ATTRIBUTE_KEY);
            if attribute_key.is_empty() {
                continue;
            }

            fields.push(SchemaField {
                attribute_key: attribute_key.to_string(),
                display_label: cell(columns::DISPLAY_LABEL).to_string(),
                data_type: DataType::parse(cell(columns::DATA_TYPE)),
                logic_type: LogicType::new(cell(columns::LOGIC_TYPE)),
                display_format: cell(columns::DISPLAY_FORMAT).to_string(),
                is_folded: cell(columns::IS_FOLDED).eq_ignore_ascii_case("true"),
                is_virtual: cell(columns::IS_VIRTUAL).eq_ignore_ascii_case("true"),
                linked_category_col: non_empty(cell(columns::LINKED_CATEGORY_COL)),
                ui_color_logic: non_empty(cell(columns::UI_COLOR_LOGIC)),
            });
        }

        Self::new(fields)
    }

    /// Fields in schema order.
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<SchemaField> {
        self.fields
    }

    pub fn get(&self, attribute_key: &str) -> Option<&SchemaField> {
        self.by_key.get(attribute_key).map(|&i| &self.fields[i])
    }

    /// Declared type of a column; columns not in the schema are `STRING`.
    pub fn data_type_of(&self, attribute_key: &str) -> DataType {
        self.get(attribute_key)
            .map(|f| f.data_type)
            .unwrap_or(DataType::String)
    }

    /// The field tagged `TARGET`, if any.
    pub fn target_field(&self) -> Option<&SchemaField> {
        self.target.map(|i| &self.fields[i])
    }

    /// Column holding the entity name: the `TARGET` field, or `"name"`.
    pub fn name_column(&self) -> &str {
        self.target_field()
            .map(|f| f.attribute_key.as_str())
            .unwrap_or(DEFAULT_NAME_COLUMN)
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}
