//! `scalar-data` is a small library that turns raw trivia datasets (countries, films, chemicals,
//! animals) into a typed, schema-described payload for a guessing game.
//!
//! There are two halves:
//!
//! - **Enrichment** ([`binning`]): derive categorical label columns from numeric ones with
//!   equal-frequency buckets, ordered threshold tables or rank buckets, and compute the
//!   tolerance window ("hit range") within which a guess counts as correct.
//! - **Assembly** ([`schema`], [`assembly`]): read each category's schema table, coerce every
//!   data cell to its declared type, and collect the entities into one [`types::Payload`].
//!
//! ## What you can read
//!
//! **File formats (auto-detected by extension):**
//!
//! - **CSV**: `.csv`
//! - **JSON**: `.json` (array-of-objects, or a spreadsheet `{"values": [[...]]}` range)
//! - **Excel/workbooks** (requires the Cargo feature `excel`): `.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`
//!
//! Each category is a pair of tables: `<key>_schema_config.<ext>` describing the columns and
//! `<key>_enriched.<ext>` holding the rows.
//!
//! ## Quick example: build a payload
//!
//! ```no_run
//! use scalar_data::assembly::{PayloadBuilder, PayloadOptions};
//! use scalar_data::config::PipelineConfig;
//!
//! # fn main() -> Result<(), scalar_data::EtlError> {
//! let config = PipelineConfig::discover("data")?;
//! let report = PayloadBuilder::from_config(&config).build(&PayloadOptions::default());
//! for skip in &report.skipped {
//!     eprintln!("skipped {}: {}", skip.category, skip.reason);
//! }
//! report.payload.write_json("public/data.json")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Enrichment example
//!
//! ```rust
//! use scalar_data::binning::{HitRange, HitRangePolicy, presets};
//!
//! let armed_forces = presets::countries::armed_forces();
//! assert_eq!(armed_forces.classify(0.0), "None");
//! assert_eq!(armed_forces.classify(10_000.0), "1-10K");
//!
//! let policy = HitRangePolicy::new(presets::countries::SMALL_MAGNITUDE_COLUMNS.iter().copied());
//! assert_eq!(policy.compute(1.0, "timezone_count"), HitRange { min: 0, max: 2 });
//! ```
//!
//! ## Modules
//!
//! - [`binning`]: quantile/rank/manual bucketing, label formatting, hit ranges, enrichment plans
//! - [`schema`]: schema table parsing and cell coercion
//! - [`assembly`]: entity assembly and payload building
//! - [`ingestion`]: format readers, [`ingestion::TabularSource`] and observers
//! - [`config`]: which categories to build and where their files live
//! - [`types`]: data model
//! - [`error`]: error types used across the crate

pub mod assembly;
pub mod binning;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod schema;
pub mod types;

pub use error::{EtlError, EtlResult};
