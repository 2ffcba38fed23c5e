//! Hooks for watching a payload build: one callback per category kept or skipped.
//!
//! Skips at or above [`PayloadOptions::alert_at_or_above`](crate::assembly::PayloadOptions)
//! are also raised through [`PipelineObserver::on_alert`].

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::EtlError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (category skipped because of bad input).
    Error,
    /// Critical error (missing files or other I/O failures).
    Critical,
}

impl Severity {
    /// Classify an error the way the payload builder reports it.
    pub fn for_error(e: &EtlError) -> Self {
        match e {
            EtlError::Io(_) | EtlError::MissingSource { .. } => Severity::Critical,
            EtlError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => Severity::Critical,
                _ => Severity::Error,
            },
            EtlError::Json(err) if err.is_io() => Severity::Critical,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        })
    }
}

/// Which category a callback refers to.
#[derive(Debug, Clone)]
pub struct CategoryContext {
    /// Category key (e.g. `countries`).
    pub category: String,
    /// Human-readable description of where the rows came from.
    pub source: String,
}

/// Aggregate counts reported when a category loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryStats {
    /// Number of schema fields.
    pub fields: usize,
    /// Number of entities kept.
    pub entities: usize,
    /// Rows dropped for lacking an id or name.
    pub dropped_rows: usize,
}

impl CategoryStats {
    /// Data rows seen, kept or dropped.
    pub fn rows_read(&self) -> usize {
        self.entities + self.dropped_rows
    }
}

/// Observer interface for payload build outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called when a category is assembled.
    fn on_category_loaded(&self, _ctx: &CategoryContext, _stats: CategoryStats) {}

    /// Called when a category is skipped.
    fn on_category_skipped(&self, _ctx: &CategoryContext, _severity: Severity, _error: &EtlError) {}

    /// Called when a skip meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_category_skipped`].
    fn on_alert(&self, ctx: &CategoryContext, severity: Severity, error: &EtlError) {
        self.on_category_skipped(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Wrap `observers`; every callback reaches each of them in list order.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_category_loaded(&self, ctx: &CategoryContext, stats: CategoryStats) {
        for o in &self.observers {
            o.on_category_loaded(ctx, stats);
        }
    }

    fn on_category_skipped(&self, ctx: &CategoryContext, severity: Severity, error: &EtlError) {
        for o in &self.observers {
            o.on_category_skipped(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &CategoryContext, severity: Severity, error: &EtlError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs payload events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_category_loaded(&self, ctx: &CategoryContext, stats: CategoryStats) {
        eprintln!(
            "[payload][ok] category={} source={} fields={} entities={}/{}",
            ctx.category,
            ctx.source,
            stats.fields,
            stats.entities,
            stats.rows_read()
        );
    }

    fn on_category_skipped(&self, ctx: &CategoryContext, severity: Severity, error: &EtlError) {
        eprintln!(
            "[payload][{}] skipped category={} source={} err={}",
            severity, ctx.category, ctx.source, error
        );
    }

    fn on_alert(&self, ctx: &CategoryContext, severity: Severity, error: &EtlError) {
        eprintln!(
            "[ALERT][payload][{}] category={} source={} err={}",
            severity, ctx.category, ctx.source, error
        );
    }
}

/// Appends payload events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_category_loaded(&self, ctx: &CategoryContext, stats: CategoryStats) {
        self.append_line(&format!(
            "{} ok category={} source={} fields={} entities={} dropped={} rows={}",
            unix_ts(),
            ctx.category,
            ctx.source,
            stats.fields,
            stats.entities,
            stats.dropped_rows,
            stats.rows_read()
        ));
    }

    fn on_category_skipped(&self, ctx: &CategoryContext, severity: Severity, error: &EtlError) {
        self.append_line(&format!(
            "{} skip severity={} category={} source={} err={}",
            unix_ts(),
            severity,
            ctx.category,
            ctx.source,
            error
        ));
    }

    fn on_alert(&self, ctx: &CategoryContext, severity: Severity, error: &EtlError) {
        self.append_line(&format!(
            "{} ALERT severity={} category={} source={} err={}",
            unix_ts(),
            severity,
            ctx.category,
            ctx.source,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::SourceRole;

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl PipelineObserver for Counter {
        fn on_category_skipped(&self, _: &CategoryContext, _: Severity, _: &EtlError) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn missing_sources_are_critical_and_shape_errors_are_not() {
        let missing = EtlError::MissingSource {
            category: "hollywood".into(),
            role: SourceRole::Data,
            path: PathBuf::from("hollywood_enriched.csv"),
        };
        assert_eq!(Severity::for_error(&missing), Severity::Critical);

        let shape = EtlError::SchemaMismatch {
            message: "missing required column 'data_type'".into(),
        };
        assert_eq!(Severity::for_error(&shape), Severity::Error);
        assert!(Severity::Critical > Severity::Error);
    }

    #[test]
    fn composite_fans_out_and_default_alert_forwards_to_skip() {
        let a = Arc::new(Counter::default());
        let b = Arc::new(Counter::default());
        let observers: Vec<Arc<dyn PipelineObserver>> = vec![a.clone(), b.clone()];
        let composite = CompositeObserver::new(observers);
        let ctx = CategoryContext {
            category: "animals".into(),
            source: "memory".into(),
        };
        let err = EtlError::InvalidBinCount { requested: 0 };

        composite.on_category_skipped(&ctx, Severity::Error, &err);
        composite.on_alert(&ctx, Severity::Error, &err);

        assert_eq!(a.0.load(Ordering::SeqCst), 2);
        assert_eq!(b.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn file_observer_appends_one_line_per_event() {
        let path = std::env::temp_dir().join(format!(
            "scalar-data-observer-{}-{}.log",
            std::process::id(),
            unix_ts()
        ));
        let obs = FileObserver::new(&path);
        let ctx = CategoryContext {
            category: "countries".into(),
            source: "countries_enriched.csv".into(),
        };
        let stats = CategoryStats {
            fields: 4,
            entities: 7,
            dropped_rows: 1,
        };
        assert_eq!(stats.rows_read(), 8);

        obs.on_category_loaded(&ctx, stats);
        obs.on_alert(&ctx, Severity::Critical, &EtlError::InvalidBinCount { requested: 0 });

        let log = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("ok category=countries source=countries_enriched.csv fields=4 entities=7 dropped=1 rows=8"));
        assert!(lines[1].contains("ALERT severity=critical category=countries"));
        let _ = std::fs::remove_file(&path);
    }
}
