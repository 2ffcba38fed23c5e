//! Derived categorical columns for a raw table.
//!
//! A plan is a list of [`DerivedColumn`]s. [`enrich_table`] evaluates each one against the source
//! column and writes the result into a copy of the table, keeping row order.

use crate::error::{EtlError, EtlResult};
use crate::types::{RawTable, SENTINEL};

use super::format::RangeStyle;
use super::hit_range::{ColumnKind, HitRange, HitRangePolicy};
use super::manual::Classifier;
use super::presets::{self, QuantilePreset};
use super::quantile::BinSpec;
use super::rank::categorize_with_labels;

/// How a derived column is computed from its source column.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    /// Equal-frequency buckets labelled with a range style.
    Quantile { bins: usize, style: RangeStyle },
    /// Ordered threshold table.
    Manual(Classifier),
    /// Equal-count buckets with fixed labels (one bucket per label).
    RankLabels(Vec<String>),
    /// Writes `<target>_min_hit` and `<target>_max_hit`.
    HitRange(ColumnKind),
}

/// One derived column: read `source`, write `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedColumn {
    pub source: String,
    pub target: String,
    pub method: Method,
}

impl DerivedColumn {
    pub fn new(source: impl Into<String>, target: impl Into<String>, method: Method) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            method,
        }
    }
}

impl From<&QuantilePreset> for DerivedColumn {
    fn from(p: &QuantilePreset) -> Self {
        DerivedColumn::new(
            p.source,
            p.target,
            Method::Quantile {
                bins: p.bins,
                style: p.style,
            },
        )
    }
}

/// Apply every derived column in order and return the enriched table.
///
/// Later columns may read columns written by earlier ones. A missing source column is a
/// [`EtlError::SchemaMismatch`].
pub fn enrich_table(table: &RawTable, plan: &[DerivedColumn]) -> EtlResult<RawTable> {
    let mut out = table.clone();
    for col in plan {
        apply_column(&mut out, col)?;
    }
    Ok(out)
}

fn apply_column(table: &mut RawTable, col: &DerivedColumn) -> EtlResult<()> {
    let missing = || EtlError::SchemaMismatch {
        message: format!(
            "derived column '{}' reads missing column '{}'. headers={:?}",
            col.target, col.source, table.headers
        ),
    };

    match &col.method {
        Method::Quantile { bins, style } => {
            let values = table.column_f64(&col.source, SENTINEL).ok_or_else(missing)?;
            let spec = BinSpec::fit(&values, *bins, style.label_fn())?;
            table.set_column(&col.target, spec.apply(&values))?;
        }
        Method::Manual(classifier) => {
            let values = table.column_f64(&col.source, f64::NAN).ok_or_else(missing)?;
            table.set_column(&col.target, classifier.classify_all(&values))?;
        }
        Method::RankLabels(labels) => {
            let values: Vec<Option<f64>> = table
                .column_f64(&col.source, f64::NAN)
                .ok_or_else(missing)?
                .into_iter()
                .map(|v| Some(v).filter(|v| !v.is_nan()))
                .collect();
            table.set_column(&col.target, categorize_with_labels(&values, labels))?;
        }
        Method::HitRange(kind) => {
            let values = table.column_f64(&col.source, SENTINEL).ok_or_else(missing)?;
            let ranges: Vec<HitRange> = values.iter().map(|v| HitRange::compute(*v, *kind)).collect();
            table.set_column(
                &format!("{}_min_hit", col.target),
                ranges.iter().map(|r| r.min.to_string()).collect(),
            )?;
            table.set_column(
                &format!("{}_max_hit", col.target),
                ranges.iter().map(|r| r.max.to_string()).collect(),
            )?;
        }
    }
    Ok(())
}

/// Hit-range columns for the given sources, resolving each kind through `policy`.
pub fn hit_range_plan(columns: &[&str], policy: &HitRangePolicy) -> Vec<DerivedColumn> {
    columns
        .iter()
        .map(|c| DerivedColumn::new(*c, *c, Method::HitRange(policy.kind_for(c))))
        .collect()
}

/// The stock country plan: quantile and manual categories.
pub fn country_category_plan() -> Vec<DerivedColumn> {
    let mut plan: Vec<DerivedColumn> = presets::countries::QUANTILE_COLUMNS
        .iter()
        .map(DerivedColumn::from)
        .collect();
    plan.extend(
        presets::countries::manual_columns()
            .into_iter()
            .map(|(source, target, c)| DerivedColumn::new(source, target, Method::Manual(c))),
    );
    plan
}

/// The stock country hit-range plan.
pub fn country_hit_range_plan() -> Vec<DerivedColumn> {
    let policy = HitRangePolicy::new(presets::countries::SMALL_MAGNITUDE_COLUMNS.iter().copied());
    hit_range_plan(presets::countries::HIT_RANGE_COLUMNS, &policy)
}

/// The stock chemical range plan.
pub fn chemical_plan() -> Vec<DerivedColumn> {
    presets::chemicals::manual_columns()
        .into_iter()
        .map(|(source, target, c)| DerivedColumn::new(source, target, Method::Manual(c)))
        .collect()
}

/// The stock animal range plan.
pub fn animal_plan() -> Vec<DerivedColumn> {
    presets::animals::manual_columns()
        .into_iter()
        .map(|(source, target, c)| DerivedColumn::new(source, target, Method::Manual(c)))
        .collect()
}

/// The stock film plan: fixed-label equal-count buckets into `<source>_category`.
pub fn film_plan() -> Vec<DerivedColumn> {
    presets::films::RANKED_COLUMNS
        .iter()
        .map(|(source, labels)| {
            DerivedColumn::new(
                *source,
                format!("{source}_category"),
                Method::RankLabels(labels.iter().map(|l| l.to_string()).collect()),
            )
        })
        .collect()
}
