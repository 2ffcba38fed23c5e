//! Raw rows + schema → [`Entity`] records.

use indexmap::IndexMap;

use crate::schema::{coerce, SchemaRegistry};
use crate::types::{Entity, RawTable};

/// Header (case-insensitive, trimmed) of the optional id column.
pub const ID_COLUMN: &str = "id";

/// Attribute keys that would collide with the fixed `id`/`name` fields of an [`Entity`].
const RESERVED_KEYS: &[&str] = &["id", "name"];

/// Row counts from one assembly pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssemblyStats {
    pub rows: usize,
    pub entities: usize,
    /// Rows dropped for an empty id or name.
    pub dropped: usize,
}

/// Turns a data table into entities using a category's schema.
#[derive(Debug, Clone)]
pub struct EntityAssembler<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> EntityAssembler<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Assemble every row of `table`, in row order.
    ///
    /// - name: the `TARGET` column (or `name`)
    /// - id: the first column whose header is `id` in any case; falls back to the name
    /// - rows whose id or name is empty after trimming are dropped
    /// - every other column is coerced with its declared type and kept only when present
    pub fn assemble(&self, table: &RawTable) -> (Vec<Entity>, AssemblyStats) {
        let name_idx = table.column_index(self.registry.name_column());
        let id_idx = table
            .headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(ID_COLUMN));

        let attr_columns: Vec<(usize, &str)> = table
            .headers
            .iter()
            .enumerate()
            .filter(|(i, h)| {
                Some(*i) != name_idx
                    && Some(*i) != id_idx
                    && !h.is_empty()
                    && !RESERVED_KEYS.iter().any(|r| h.eq_ignore_ascii_case(r))
            })
            .map(|(i, h)| (i, h.as_str()))
            .collect();

        let mut stats = AssemblyStats {
            rows: table.row_count(),
            ..Default::default()
        };
        let mut entities = Vec::with_capacity(table.row_count());

        for row in &table.rows {
            let cell = |idx: Option<usize>| {
                idx.and_then(|i| row.get(i))
                    .map(|s| s.trim())
                    .unwrap_or("")
            };

            let name = cell(name_idx);
            let id = match id_idx {
                Some(_) => cell(id_idx),
                None => name,
            };
            if id.is_empty() || name.is_empty() {
                stats.dropped += 1;
                continue;
            }

            let mut attributes = IndexMap::with_capacity(attr_columns.len());
            for &(idx, key) in &attr_columns {
                let raw = row.get(idx).map(|s| s.as_str()).unwrap_or("");
                if let Some(value) = coerce(raw, self.registry.data_type_of(key)) {
                    attributes.insert(key.to_string(), value);
                }
            }

            entities.push(Entity {
                id: id.to_string(),
                name: name.to_string(),
                attributes,
            });
        }

        stats.entities = entities.len();
        (entities, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, SchemaField, Value};

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn country_registry() -> SchemaRegistry {
        SchemaRegistry::new(vec![
            SchemaField::new("name", DataType::String).with_logic("TARGET"),
            SchemaField::new("population", DataType::Int),
            SchemaField::new("GDP", DataType::Currency),
            SchemaField::new("landlocked", DataType::Boolean),
        ])
        .unwrap()
    }

    #[test]
    fn coerces_declared_types_and_omits_absent_cells() {
        let reg = country_registry();
        let t = table(
            &["ID", "name", "population", "GDP", "landlocked", "capital"],
            &[&["USA", "United States", "331,000,000", "$21,433,226,000,000", "no", "Washington"],
              &["AND", "Andorra", "-1", "", "yes", ""]],
        );
        let (entities, stats) = EntityAssembler::new(&reg).assemble(&t);
        assert_eq!(stats, AssemblyStats { rows: 2, entities: 2, dropped: 0 });

        let usa = &entities[0];
        assert_eq!(usa.id, "USA");
        assert_eq!(usa.name, "United States");
        assert_eq!(usa.get("population"), Some(&Value::Int(331_000_000)));
        assert_eq!(usa.get("GDP"), Some(&Value::Float(21_433_226_000_000.0)));
        assert_eq!(usa.get("landlocked"), Some(&Value::Bool(false)));
        assert_eq!(usa.get("capital"), Some(&Value::Str("Washington".into())));
        assert!(usa.get("ID").is_none());

        let andorra = &entities[1];
        assert!(andorra.get("population").is_none());
        assert!(andorra.get("GDP").is_none());
        assert!(andorra.get("capital").is_none());
        assert_eq!(andorra.get("landlocked"), Some(&Value::Bool(true)));
    }

    #[test]
    fn id_falls_back_to_name_and_blank_rows_are_dropped() {
        let reg = SchemaRegistry::new(vec![
            SchemaField::new("Title", DataType::String).with_logic("TARGET"),
            SchemaField::new("Year", DataType::Int),
        ])
        .unwrap();
        let t = table(&["Title", "Year"], &[&["Heat", "1995"], &["  ", "2001"], &["Alien"]]);
        let (entities, stats) = EntityAssembler::new(&reg).assemble(&t);

        assert_eq!(stats.dropped, 1);
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].id, "Heat");
        assert_eq!(entities[0].get("Year"), Some(&Value::Int(1995)));
        assert!(entities[0].get("Title").is_none());
        assert_eq!(entities[1].name, "Alien");
        assert!(entities[1].get("Year").is_none());
    }

    #[test]
    fn empty_id_drops_row_even_with_a_name() {
        let reg = country_registry();
        let t = table(&["id", "name"], &[&["", "Nowhere"], &["FRA", "France"]]);
        let (entities, stats) = EntityAssembler::new(&reg).assemble(&t);
        assert_eq!(stats.dropped, 1);
        assert_eq!(entities[0].id, "FRA");
    }

    #[test]
    fn undeclared_columns_are_strings() {
        let reg = country_registry();
        let t = table(&["name", "code"], &[&["France", "250"]]);
        let (entities, _) = EntityAssembler::new(&reg).assemble(&t);
        assert_eq!(entities[0].get("code"), Some(&Value::Str("250".into())));
    }

    #[test]
    fn assembling_twice_is_identical() {
        let reg = country_registry();
        let t = table(
            &["id", "name", "population", "GDP"],
            &[&["DEU", "Germany", "83,000,000", "3.8e12"]],
        );
        let asm = EntityAssembler::new(&reg);
        let first = serde_json::to_string(&asm.assemble(&t).0).unwrap();
        let second = serde_json::to_string(&asm.assemble(&t).0).unwrap();
        assert_eq!(first, second);
    }
}
