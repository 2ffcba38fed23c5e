use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type used across the crate.
pub type EtlResult<T> = Result<T, EtlError>;

/// Which half of a category's input is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRole {
    /// The per-column metadata table.
    Schema,
    /// The entity rows.
    Data,
}

impl std::fmt::Display for SourceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceRole::Schema => f.write_str("schema"),
            SourceRole::Data => f.write_str("data"),
        }
    }
}

/// Error type returned by sources, the binning tools and the payload builder.
///
/// Data-quality problems (unparseable cells, unknown data types, rows without a name) are not
/// errors; they are absorbed by the coercion and assembly rules. Only infrastructure failures and
/// invalid configuration end up here.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Underlying I/O error (e.g. permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "excel")]
    /// Spreadsheet read error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// A category's schema or data file does not exist.
    #[error("{role} source for category '{category}' not found: {}", path.display())]
    MissingSource {
        category: String,
        role: SourceRole,
        path: PathBuf,
    },

    /// The input does not have the expected shape (missing header, missing column, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A classification rule table is malformed (e.g. no catch-all rule at the end).
    #[error("invalid classification rules: {message}")]
    InvalidRules { message: String },

    /// Quantile binning was asked for zero buckets.
    #[error("bin count must be >= 1 (got {requested})")]
    InvalidBinCount { requested: usize },
}
