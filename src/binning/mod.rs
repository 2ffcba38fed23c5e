//! Numeric column categorization.
//!
//! - [`quantile`]: equal-frequency buckets with pluggable range labels
//! - [`rank`]: equal-count buckets with fixed word labels
//! - [`manual`]: ordered `(predicate, label)` tables for skewed or sentinel-heavy columns
//! - [`hit_range`]: tolerance windows around true values
//! - [`format`]: compact number formatting for labels
//! - [`presets`]: stock tables for the bundled datasets
//! - [`enrich`]: apply any of the above to a [`crate::types::RawTable`]
//!
//! ## Example
//!
//! ```rust
//! use scalar_data::binning::{quantile_labels, RangeStyle, UNKNOWN_LABEL};
//!
//! let population = [331_000_000.0, 67_000_000.0, -1.0, 5_400_000.0, 1_400_000_000.0];
//! let labels = quantile_labels(&population, 2, RangeStyle::Compact.label_fn()).unwrap();
//! assert_eq!(labels[2], UNKNOWN_LABEL);
//! assert_eq!(labels.len(), population.len());
//! ```

pub mod enrich;
pub mod format;
pub mod hit_range;
pub mod manual;
pub mod presets;
pub mod quantile;
pub mod rank;

pub use enrich::{enrich_table, DerivedColumn, Method};
pub use format::{fmt_compact, fmt_grouped, RangeStyle};
pub use hit_range::{ColumnKind, HitRange, HitRangePolicy};
pub use manual::{ClassificationRule, Classifier, Predicate};
pub use quantile::{quantile_edges, quantile_labels, BinSpec, UNKNOWN_LABEL};
pub use rank::{assign_rank_bucket, categorize_with_labels, rank_buckets};
