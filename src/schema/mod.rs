//! Per-column metadata and typed coercion.
//!
//! - [`registry`]: parses a schema table into [`crate::types::SchemaField`]s and resolves the
//!   entity-name column
//! - [`coerce`]: converts raw cells into typed [`crate::types::Value`]s

pub mod coerce;
pub mod registry;

pub use coerce::{coerce, is_sentinel};
pub use registry::{SchemaRegistry, DEFAULT_NAME_COLUMN};
