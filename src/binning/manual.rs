//! Ordered threshold tables for columns that bin poorly by quantile.
//!
//! A [`Classifier`] is a list of `(predicate, label)` rules evaluated top to bottom; the first
//! predicate that accepts the value wins. The last rule is always a catch-all, so every value gets
//! a label.

use std::fmt;

use crate::error::{EtlError, EtlResult};

/// A single numeric test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate {
    /// Accepts everything, including missing values.
    Any,
    /// Accepts only missing (NaN) values.
    Missing,
    /// `value == x`
    Eq(f64),
    /// `value < x`
    Lt(f64),
    /// `value <= x`
    Le(f64),
    /// `value > x`
    Gt(f64),
    /// `value >= x`
    Ge(f64),
}

impl Predicate {
    /// Whether `value` satisfies this predicate. NaN only satisfies [`Predicate::Any`] and
    /// [`Predicate::Missing`].
    pub fn accepts(&self, value: f64) -> bool {
        match *self {
            Predicate::Any => true,
            Predicate::Missing => value.is_nan(),
            Predicate::Eq(x) => value == x,
            Predicate::Lt(x) => value < x,
            Predicate::Le(x) => value <= x,
            Predicate::Gt(x) => value > x,
            Predicate::Ge(x) => value >= x,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Any => f.write_str("*"),
            Predicate::Missing => f.write_str("missing"),
            Predicate::Eq(x) => write!(f, "== {x}"),
            Predicate::Lt(x) => write!(f, "< {x}"),
            Predicate::Le(x) => write!(f, "<= {x}"),
            Predicate::Gt(x) => write!(f, "> {x}"),
            Predicate::Ge(x) => write!(f, ">= {x}"),
        }
    }
}

/// One `(predicate, label)` row of a classification table.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRule {
    pub predicate: Predicate,
    pub label: String,
}

impl ClassificationRule {
    pub fn new(predicate: Predicate, label: impl Into<String>) -> Self {
        Self {
            predicate,
            label: label.into(),
        }
    }
}

/// First-match-wins evaluator over an ordered rule list ending in a catch-all.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    rules: Vec<ClassificationRule>,
}

impl Classifier {
    /// Build from a complete rule list.
    ///
    /// The list must be non-empty and its last rule must be [`Predicate::Any`].
    pub fn new(rules: Vec<ClassificationRule>) -> EtlResult<Self> {
        match rules.last() {
            None => Err(EtlError::InvalidRules {
                message: "rule list is empty".to_string(),
            }),
            Some(last) if last.predicate != Predicate::Any => Err(EtlError::InvalidRules {
                message: format!(
                    "last rule must be a catch-all, found '{}' -> '{}'",
                    last.predicate, last.label
                ),
            }),
            Some(_) => Ok(Self { rules }),
        }
    }

    /// Build from threshold rows plus a default label, which becomes the trailing catch-all.
    pub fn with_default(rules: &[(Predicate, &str)], default: &str) -> Self {
        let mut out: Vec<ClassificationRule> = rules
            .iter()
            .map(|(p, label)| ClassificationRule::new(*p, *label))
            .collect();
        out.push(ClassificationRule::new(Predicate::Any, default));
        Self { rules: out }
    }

    /// Rules in evaluation order (the last one is the catch-all).
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Label of the first rule accepting `value`.
    pub fn classify(&self, value: f64) -> &str {
        self.rules
            .iter()
            .find(|r| r.predicate.accepts(value))
            .map(|r| r.label.as_str())
            // Unreachable: the last rule accepts everything.
            .unwrap_or_default()
    }

    /// Classify a possibly-absent value; `None` is evaluated as missing.
    pub fn classify_opt(&self, value: Option<f64>) -> &str {
        self.classify(value.unwrap_or(f64::NAN))
    }

    /// Label every value, preserving order.
    pub fn classify_all(&self, values: &[f64]) -> Vec<String> {
        values.iter().map(|v| self.classify(*v).to_string()).collect()
    }

    /// Every distinct label this classifier can produce, in rule order.
    pub fn labels(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.rules.len());
        for r in &self.rules {
            if !out.contains(&r.label.as_str()) {
                out.push(&r.label);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Classifier {
        Classifier::with_default(
            &[
                (Predicate::Eq(-1.0), "Unknown"),
                (Predicate::Lt(10.0), "Small"),
                (Predicate::Le(100.0), "Medium"),
            ],
            "Large",
        )
    }

    #[test]
    fn first_matching_rule_wins() {
        let c = sample();
        assert_eq!(c.classify(-1.0), "Unknown");
        assert_eq!(c.classify(-5.0), "Small");
        assert_eq!(c.classify(9.99), "Small");
        assert_eq!(c.classify(10.0), "Medium");
        assert_eq!(c.classify(100.0), "Medium");
        assert_eq!(c.classify(100.5), "Large");
    }

    #[test]
    fn missing_falls_through_to_catch_all_unless_matched() {
        let c = sample();
        assert_eq!(c.classify(f64::NAN), "Large");

        let with_missing = Classifier::with_default(&[(Predicate::Missing, "")], "present");
        assert_eq!(with_missing.classify_opt(None), "");
        assert_eq!(with_missing.classify_opt(Some(3.0)), "present");
    }

    #[test]
    fn classification_is_deterministic() {
        let c = sample();
        let values = [5.0, 50.0, 500.0, -1.0];
        assert_eq!(c.classify_all(&values), c.classify_all(&values));
    }

    #[test]
    fn new_requires_trailing_catch_all() {
        let err = Classifier::new(vec![ClassificationRule::new(Predicate::Lt(1.0), "a")]).unwrap_err();
        assert!(err.to_string().contains("catch-all"));
        assert!(Classifier::new(Vec::new()).is_err());

        let ok = Classifier::new(vec![
            ClassificationRule::new(Predicate::Ge(1.0), "big"),
            ClassificationRule::new(Predicate::Any, "small"),
        ])
        .unwrap();
        assert_eq!(ok.classify(0.5), "small");
    }

    #[test]
    fn labels_are_distinct_and_ordered() {
        let c = Classifier::with_default(
            &[(Predicate::Missing, ""), (Predicate::Lt(0.0), ""), (Predicate::Lt(4.0), "Minimal")],
            "More",
        );
        assert_eq!(c.labels(), vec!["", "Minimal", "More"]);
    }
}
