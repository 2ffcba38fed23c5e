//! Reading category tables and reporting load outcomes.
//!
//! Most callers hand a [`TabularSource`] to the payload builder and never touch the readers
//! directly. When they do, [`read_table_from_path`] (from [`unified`]) auto-detects the format by
//! file extension.
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]
//! - `excel` (feature-gated)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod json;
pub mod observability;
pub mod source;
pub mod unified;

pub use observability::{
    CategoryContext, CategoryStats, CompositeObserver, FileObserver, PipelineObserver, Severity,
    StdErrObserver,
};
pub use source::{FileSource, MemorySource, TabularSource};
pub use unified::{read_table_from_path, SourceFormat};
