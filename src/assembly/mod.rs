//! Typed entity assembly and payload aggregation.
//!
//! - [`EntityAssembler`] turns one category's data rows into [`crate::types::Entity`] records
//! - [`PayloadBuilder`] runs every registered category and collects the results

pub mod entity;
pub mod payload;

pub use entity::{AssemblyStats, EntityAssembler, ID_COLUMN};
pub use payload::{PayloadBuilder, PayloadOptions, PayloadReport, SkippedCategory};
