//! Equal-frequency (quantile) binning.
//!
//! Edges are the `n + 1` linear-interpolation quantiles of the known values. Repeated values can
//! produce identical adjacent edges; those are collapsed, so a heavily skewed column ends up with
//! fewer, wider buckets rather than empty ones.
//!
//! Bucket membership follows the usual closed-right convention with an inclusive lower bound on
//! the first bucket: `[e0, e1], (e1, e2], ..., (e(k-1), ek]`.

use crate::error::{EtlError, EtlResult};
use crate::types::SENTINEL;

/// Label given to sentinel (and non-finite) values.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Fitted bucket edges plus one label per bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BinSpec {
    edges: Vec<f64>,
    labels: Vec<String>,
}

impl BinSpec {
    /// Fit `bins` equal-frequency buckets over the known values of `values`.
    ///
    /// Values equal to [`SENTINEL`] (and NaN/infinite values) do not take part in edge
    /// computation. `label_fn(low, high, index, total)` names each bucket.
    ///
    /// If every known value is identical a single bucket `[v, v]` is produced. If there are no
    /// known values there are zero buckets.
    pub fn fit<F>(values: &[f64], bins: usize, label_fn: F) -> EtlResult<Self>
    where
        F: Fn(f64, f64, usize, usize) -> String,
    {
        if bins == 0 {
            return Err(EtlError::InvalidBinCount { requested: bins });
        }

        let mut known: Vec<f64> = values.iter().copied().filter(|v| is_known(*v)).collect();
        known.sort_by(f64::total_cmp);

        let mut edges = quantile_edges_sorted(&known, bins);
        if edges.len() == 1 {
            edges.push(edges[0]);
        }

        let total = edges.len().saturating_sub(1);
        let labels = edges
            .windows(2)
            .enumerate()
            .map(|(i, w)| label_fn(w[0], w[1], i, total))
            .collect();

        Ok(Self { edges, labels })
    }

    /// Bucket boundaries, ascending.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Bucket labels, one per adjacent pair of edges.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Effective number of buckets (may be lower than requested).
    pub fn bucket_count(&self) -> usize {
        self.labels.len()
    }

    /// Index of the bucket containing `value`, or `None` for sentinel/out-of-range values.
    pub fn bucket_of(&self, value: f64) -> Option<usize> {
        if !is_known(value) || self.labels.is_empty() {
            return None;
        }
        let first = self.edges[0];
        let last = self.edges[self.edges.len() - 1];
        if value < first || value > last {
            return None;
        }
        // Number of edges strictly below `value`; an exact edge hit belongs to the lower bucket.
        let below = self.edges.partition_point(|e| *e < value);
        Some(below.saturating_sub(1).min(self.labels.len() - 1))
    }

    /// Label for `value`; sentinel values are always [`UNKNOWN_LABEL`].
    pub fn label_for(&self, value: f64) -> &str {
        match self.bucket_of(value) {
            Some(i) => &self.labels[i],
            None => UNKNOWN_LABEL,
        }
    }

    /// Label every value, preserving order and length.
    pub fn apply(&self, values: &[f64]) -> Vec<String> {
        values.iter().map(|v| self.label_for(*v).to_string()).collect()
    }
}

/// Quantile edges of `values` (sentinels excluded), with duplicate edges collapsed.
///
/// Returns an empty vector when there are no known values.
pub fn quantile_edges(values: &[f64], bins: usize) -> Vec<f64> {
    let mut known: Vec<f64> = values.iter().copied().filter(|v| is_known(*v)).collect();
    known.sort_by(f64::total_cmp);
    quantile_edges_sorted(&known, bins)
}

/// Fit and apply in one step: one label per input value.
pub fn quantile_labels<F>(values: &[f64], bins: usize, label_fn: F) -> EtlResult<Vec<String>>
where
    F: Fn(f64, f64, usize, usize) -> String,
{
    let spec = BinSpec::fit(values, bins, label_fn)?;
    Ok(spec.apply(values))
}

fn is_known(v: f64) -> bool {
    v.is_finite() && v != SENTINEL
}

fn quantile_edges_sorted(sorted: &[f64], bins: usize) -> Vec<f64> {
    if sorted.is_empty() || bins == 0 {
        return Vec::new();
    }
    let mut edges: Vec<f64> = Vec::with_capacity(bins + 1);
    for i in 0..=bins {
        let q = i as f64 / bins as f64;
        let edge = interpolate(sorted, q);
        if edges.last().is_none_or(|prev| edge > *prev) {
            edges.push(edge);
        }
    }
    edges
}

/// Linear interpolation between closest ranks (`pos = q * (n - 1)`).
fn interpolate(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = pos - lo as f64;
    if frac == 0.0 || lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}
