//! Tolerance windows for accepting approximate numeric answers.

use std::collections::HashSet;

use crate::types::SENTINEL;

/// How a column's tolerance is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Discrete counts: ±1 absolute, never below zero.
    SmallMagnitude,
    /// Populations, areas, money, densities: ±20% relative.
    LargeMagnitude,
}

/// Relative tolerance applied to [`ColumnKind::LargeMagnitude`] columns.
pub const RELATIVE_TOLERANCE: f64 = 0.20;

/// Inclusive `(min, max)` acceptance window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRange {
    pub min: i64,
    pub max: i64,
}

impl HitRange {
    /// The "no tolerance defined" window returned for sentinel input.
    pub const UNDEFINED: HitRange = HitRange { min: -1, max: -1 };

    /// Compute the window around `value`.
    ///
    /// Sentinel (and non-finite) values map to [`HitRange::UNDEFINED`]. Otherwise both bounds are
    /// integers with `min <= value <= max`.
    pub fn compute(value: f64, kind: ColumnKind) -> HitRange {
        if value == SENTINEL || !value.is_finite() {
            return Self::UNDEFINED;
        }
        match kind {
            ColumnKind::SmallMagnitude => HitRange {
                min: (value - 1.0).max(0.0).min(value).floor() as i64,
                max: (value + 1.0).ceil() as i64,
            },
            ColumnKind::LargeMagnitude => {
                let delta = value.abs() * RELATIVE_TOLERANCE;
                HitRange {
                    min: (value - delta).floor() as i64,
                    max: (value + delta).ceil() as i64,
                }
            }
        }
    }

    /// Whether `guess` falls inside the window. An undefined window accepts nothing.
    pub fn contains(&self, guess: f64) -> bool {
        *self != Self::UNDEFINED && guess >= self.min as f64 && guess <= self.max as f64
    }
}

/// Maps column names to a [`ColumnKind`].
///
/// Columns listed as small-magnitude use the absolute window; everything else is relative.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HitRangePolicy {
    small_columns: HashSet<String>,
}

impl HitRangePolicy {
    pub fn new<I, S>(small_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            small_columns: small_columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn kind_for(&self, column: &str) -> ColumnKind {
        if self.small_columns.contains(column) {
            ColumnKind::SmallMagnitude
        } else {
            ColumnKind::LargeMagnitude
        }
    }

    /// Window for `value` in `column`.
    pub fn compute(&self, value: f64, column: &str) -> HitRange {
        HitRange::compute(value, self.kind_for(column))
    }
}
