//! Which categories a payload run reads, and from where.
//!
//! A [`PipelineConfig`] is plain data: it can be built in code ([`PipelineConfig::default_categories`]),
//! found on disk ([`PipelineConfig::discover`]) or loaded from JSON ([`PipelineConfig::from_json_path`]).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EtlError, EtlResult};
use crate::ingestion::{FileSource, SourceFormat};

/// Categories shipped with the game, in payload order.
pub const DEFAULT_CATEGORY_KEYS: &[&str] = &["countries", "hollywood", "chemicals", "animals"];

/// File-name suffix of a schema table (before the extension).
pub const SCHEMA_SUFFIX: &str = "_schema_config";
/// File-name suffix of a data table (before the extension).
pub const DATA_SUFFIX: &str = "_enriched";

/// One category's schema and data files.
///
/// Relative paths are resolved against [`PipelineConfig::data_dir`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySource {
    pub key: String,
    pub schema: PathBuf,
    pub data: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SourceFormat>,
}

impl CategorySource {
    /// `<key>_schema_config.csv` / `<key>_enriched.csv`.
    pub fn conventional(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            schema: PathBuf::from(format!("{key}{SCHEMA_SUFFIX}.csv")),
            data: PathBuf::from(format!("{key}{DATA_SUFFIX}.csv")),
            key,
            format: None,
        }
    }
}

/// The set of categories to build.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    pub categories: Vec<CategorySource>,
}

impl PipelineConfig {
    /// The stock four categories under `data_dir`.
    pub fn default_categories(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            categories: DEFAULT_CATEGORY_KEYS
                .iter()
                .map(|k| CategorySource::conventional(*k))
                .collect(),
        }
    }

    /// Load a config from a JSON file.
    ///
    /// ```json
    /// { "data_dir": "data", "categories": [
    ///     { "key": "countries", "schema": "countries_schema_config.csv", "data": "countries_enriched.csv" }
    /// ] }
    /// ```
    pub fn from_json_path(path: impl AsRef<Path>) -> EtlResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Find every `<key>_schema_config.<ext>` in `data_dir` and pair it with
    /// `<key>_enriched.<ext>`.
    ///
    /// Categories are sorted by key. A schema without a data file is still listed; building it
    /// records a skip.
    pub fn discover(data_dir: impl AsRef<Path>) -> EtlResult<Self> {
        let data_dir = data_dir.as_ref();
        let pattern = data_dir.join(format!("*{SCHEMA_SUFFIX}.*"));
        let pattern = pattern.to_str().ok_or_else(|| EtlError::SchemaMismatch {
            message: format!("data directory is not valid UTF-8: {}", data_dir.display()),
        })?;

        let paths = glob::glob(pattern).map_err(|e| EtlError::SchemaMismatch {
            message: format!("invalid discovery pattern '{pattern}': {e}"),
        })?;

        let mut categories = Vec::new();
        for entry in paths {
            let schema_path = entry.map_err(|e| EtlError::Io(e.into_error()))?;
            let Some(file_name) = schema_path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some((key, ext)) = file_name.rsplit_once('.') else {
                continue;
            };
            let Some(key) = key.strip_suffix(SCHEMA_SUFFIX) else {
                continue;
            };
            if key.is_empty() || SourceFormat::from_extension(ext).is_none() {
                continue;
            }
            categories.push(CategorySource {
                key: key.to_string(),
                schema: PathBuf::from(file_name),
                data: PathBuf::from(format!("{key}{DATA_SUFFIX}.{ext}")),
                format: None,
            });
        }
        categories.sort_by(|a, b| a.key.cmp(&b.key));

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            categories,
        })
    }

    /// Resolve a category's paths into a [`FileSource`].
    pub fn file_source(&self, category: &CategorySource) -> FileSource {
        let src = FileSource::new(
            category.key.clone(),
            self.data_dir.join(&category.schema),
            self.data_dir.join(&category.data),
        );
        match category.format {
            Some(f) => src.with_format(f),
            None => src,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_categories_follow_naming_convention() {
        let cfg = PipelineConfig::default_categories("data");
        let keys: Vec<&str> = cfg.categories.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, DEFAULT_CATEGORY_KEYS);

        let src = cfg.file_source(&cfg.categories[1]);
        assert_eq!(src.schema_path(), Path::new("data/hollywood_schema_config.csv"));
        assert_eq!(src.data_path(), Path::new("data/hollywood_enriched.csv"));
    }

    #[test]
    fn config_deserializes_with_optional_format() {
        let cfg: PipelineConfig = serde_json::from_str(
            r#"{"data_dir":"d","categories":[
                {"key":"a","schema":"a_s.json","data":"a_d.json","format":"json"},
                {"key":"b","schema":"b_s.csv","data":"b_d.csv"}]}"#,
        )
        .unwrap();
        assert_eq!(cfg.categories[0].format, Some(SourceFormat::Json));
        assert_eq!(cfg.categories[1].format, None);
    }
}
