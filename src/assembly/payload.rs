//! Per-category schema + entities → one [`Payload`].
//!
//! Categories are independent: a category whose schema or data cannot be read is recorded in
//! [`PayloadReport::skipped`] and left out of the payload, and the rest are still built.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::config::PipelineConfig;
use crate::error::{EtlError, EtlResult};
use crate::ingestion::{CategoryContext, CategoryStats, PipelineObserver, Severity, TabularSource};
use crate::schema::SchemaRegistry;
use crate::types::{CategoryPayload, Payload};

use super::entity::EntityAssembler;

/// Options controlling a payload build.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct PayloadOptions {
    /// Build categories on the rayon thread pool. Output order is unchanged.
    pub parallel: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for PayloadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadOptions")
            .field("parallel", &self.parallel)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for PayloadOptions {
    fn default() -> Self {
        Self {
            parallel: false,
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// A category left out of the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCategory {
    pub category: String,
    /// Rendered error.
    pub reason: String,
    pub severity: Severity,
}

/// Result of [`PayloadBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct PayloadReport {
    /// Every category that loaded, in registration order.
    pub payload: Payload,
    /// Categories that failed, in registration order.
    pub skipped: Vec<SkippedCategory>,
    /// Counts for each loaded category.
    pub stats: IndexMap<String, CategoryStats>,
}

impl PayloadReport {
    /// Whether every registered category made it into the payload.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Collects category sources and builds the payload.
///
/// ```no_run
/// use std::sync::Arc;
///
/// use scalar_data::assembly::{PayloadBuilder, PayloadOptions};
/// use scalar_data::config::PipelineConfig;
/// use scalar_data::ingestion::StdErrObserver;
///
/// # fn main() -> Result<(), scalar_data::EtlError> {
/// let config = PipelineConfig::default_categories("data");
/// let options = PayloadOptions {
///     observer: Some(Arc::new(StdErrObserver)),
///     ..Default::default()
/// };
/// let report = PayloadBuilder::from_config(&config).build(&options);
/// report.payload.write_json("out/data.json")?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct PayloadBuilder {
    categories: Vec<(String, Box<dyn TabularSource>)>,
}

impl fmt::Debug for PayloadBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadBuilder")
            .field(
                "categories",
                &self.categories.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// One [`crate::ingestion::FileSource`] per configured category.
    pub fn from_config(config: &PipelineConfig) -> Self {
        config.categories.iter().fold(Self::new(), |b, c| {
            b.with_category(c.key.clone(), config.file_source(c))
        })
    }

    /// Register a category. Registering a key twice replaces the earlier source in place.
    pub fn with_category(mut self, key: impl Into<String>, source: impl TabularSource + 'static) -> Self {
        self.add_category(key, Box::new(source));
        self
    }

    pub fn add_category(&mut self, key: impl Into<String>, source: Box<dyn TabularSource>) {
        let key = key.into();
        match self.categories.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = source,
            None => self.categories.push((key, source)),
        }
    }

    /// Registered category keys, in order.
    pub fn category_keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(k, _)| k.as_str())
    }

    /// Load every category and assemble the payload.
    ///
    /// When an observer is configured, this reports:
    ///
    /// - `on_category_loaded` for each category in the payload
    /// - `on_category_skipped` for each failed category, with a computed severity
    /// - `on_alert` when that severity is >= `options.alert_at_or_above`
    pub fn build(&self, options: &PayloadOptions) -> PayloadReport {
        let results: Vec<EtlResult<(CategoryPayload, CategoryStats)>> = if options.parallel {
            self.categories
                .par_iter()
                .map(|(_, src)| load_category(src.as_ref()))
                .collect()
        } else {
            self.categories
                .iter()
                .map(|(_, src)| load_category(src.as_ref()))
                .collect()
        };

        let mut report = PayloadReport::default();
        for ((key, src), result) in self.categories.iter().zip(results) {
            let ctx = CategoryContext {
                category: key.clone(),
                source: src.describe(),
            };
            match result {
                Ok((category, stats)) => {
                    if let Some(obs) = options.observer.as_ref() {
                        obs.on_category_loaded(&ctx, stats);
                    }
                    report.payload.insert(key.clone(), category);
                    report.stats.insert(key.clone(), stats);
                }
                Err(e) => {
                    let severity = Severity::for_error(&e);
                    notify_skip(options, &ctx, severity, &e);
                    report.skipped.push(SkippedCategory {
                        category: key.clone(),
                        reason: e.to_string(),
                        severity,
                    });
                }
            }
        }
        report
    }
}

fn notify_skip(options: &PayloadOptions, ctx: &CategoryContext, severity: Severity, e: &EtlError) {
    if let Some(obs) = options.observer.as_ref() {
        obs.on_category_skipped(ctx, severity, e);
        if severity >= options.alert_at_or_above {
            obs.on_alert(ctx, severity, e);
        }
    }
}

/// Read, validate and assemble one category. Both tables must load or nothing is returned.
fn load_category(source: &dyn TabularSource) -> EtlResult<(CategoryPayload, CategoryStats)> {
    let registry = SchemaRegistry::from_table(&source.schema_table()?)?;
    let data = source.data_table()?;
    let (entities, assembly) = EntityAssembler::new(&registry).assemble(&data);

    let stats = CategoryStats {
        fields: registry.fields().len(),
        entities: assembly.entities,
        dropped_rows: assembly.dropped,
    };
    Ok((
        CategoryPayload {
            schema_config: registry.into_fields(),
            entities,
        },
        stats,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ingestion::MemorySource;
    use crate::types::RawTable;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn schema() -> RawTable {
        table(
            &["attribute_key", "data_type", "logic_type"],
            &[&["name", "STRING", "TARGET"], &["score", "INT", ""]],
        )
    }

    fn data() -> RawTable {
        table(&["name", "score"], &[&["a", "1"], &["", "2"], &["b", "x"]])
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl PipelineObserver for Recorder {
        fn on_category_loaded(&self, ctx: &CategoryContext, stats: CategoryStats) {
            self.events
                .lock()
                .unwrap()
                .push(format!("ok:{}:{}:{}", ctx.category, stats.entities, stats.dropped_rows));
        }

        fn on_category_skipped(&self, ctx: &CategoryContext, severity: Severity, _: &EtlError) {
            self.events
                .lock()
                .unwrap()
                .push(format!("skip:{}:{:?}", ctx.category, severity));
        }

        fn on_alert(&self, ctx: &CategoryContext, _: Severity, _: &EtlError) {
            self.events.lock().unwrap().push(format!("alert:{}", ctx.category));
        }
    }

    #[test]
    fn skipped_category_is_reported_and_omitted() {
        let rec = Arc::new(Recorder::default());
        let opts = PayloadOptions {
            observer: Some(rec.clone()),
            ..Default::default()
        };
        let report = PayloadBuilder::new()
            .with_category("first", MemorySource::new(schema(), data()))
            .with_category("broken", MemorySource::schema_only(schema()))
            .build(&opts);

        assert_eq!(report.payload.category_names().collect::<Vec<_>>(), vec!["first"]);
        assert!(!report.payload.schema_config.contains_key("broken"));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].severity, Severity::Critical);
        assert_eq!(
            *rec.events.lock().unwrap(),
            vec!["ok:first:2:1", "skip:broken:Critical", "alert:broken"]
        );
    }

    #[test]
    fn schema_without_required_columns_is_an_error_skip() {
        let bad_schema = table(&["key"], &[&["name"]]);
        let report = PayloadBuilder::new()
            .with_category("bad", MemorySource::new(bad_schema, data()))
            .build(&PayloadOptions::default());
        assert!(report.payload.categories.is_empty());
        assert_eq!(report.skipped[0].severity, Severity::Error);
        assert!(report.skipped[0].reason.contains("attribute_key"));
    }

    #[test]
    fn parallel_build_keeps_registration_order() {
        let mut builder = PayloadBuilder::new();
        for key in ["z", "m", "a", "q"] {
            builder.add_category(key, Box::new(MemorySource::new(schema(), data())));
        }
        let report = builder.build(&PayloadOptions {
            parallel: true,
            ..Default::default()
        });
        assert_eq!(
            report.payload.category_names().collect::<Vec<_>>(),
            vec!["z", "m", "a", "q"]
        );
        assert_eq!(report.stats["a"].entities, 2);
        assert!(report.is_complete());
    }

    #[test]
    fn re_registering_a_key_replaces_the_source() {
        let builder = PayloadBuilder::new()
            .with_category("c", MemorySource::schema_only(schema()))
            .with_category("c", MemorySource::new(schema(), data()));
        assert_eq!(builder.category_keys().collect::<Vec<_>>(), vec!["c"]);
        assert!(builder.build(&PayloadOptions::default()).is_complete());
    }
}
