//! Raw cell → typed [`Value`] conversion.
//!
//! Coercion never fails loudly: a cell that cannot be read as its declared type is simply absent
//! (`None`), and absent cells are left out of the entity.

use crate::types::{parse_number, DataType, Value};

/// Textual forms that always mean "no value".
const SENTINEL_CELLS: &[&str] = &["", "-1"];

/// Convert `raw` according to `data_type`.
///
/// - empty / `-1` cells → `None` for every type
/// - `Int`: `$` and `,` stripped, parsed as a float, truncated
/// - `Float`: same stripping, rounded to 6 decimals
/// - `Currency`: same stripping, rounded to 2 decimals
/// - `Boolean`: `true`/`1`/`yes` (any case) → `true`, anything else → `false`
/// - `String`/`List`: the trimmed text
pub fn coerce(raw: &str, data_type: DataType) -> Option<Value> {
    let s = raw.trim();
    if is_sentinel(s) {
        return None;
    }

    match data_type {
        DataType::Int => parse_number(s).map(|v| Value::Int(v.trunc() as i64)),
        DataType::Float => parse_number(s).map(|v| Value::Float(round_to(v, 6))),
        DataType::Currency => parse_number(s).map(|v| Value::Float(round_to(v, 2))),
        DataType::Boolean => Some(Value::Bool(parse_bool(s))),
        DataType::String | DataType::List => Some(Value::Str(s.to_string())),
    }
}

/// Whether a (trimmed) cell is one of the "no value" forms.
pub fn is_sentinel(cell: &str) -> bool {
    SENTINEL_CELLS.contains(&cell)
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

/// Round half-to-even on the exact binary value, matching decimal formatting.
fn round_to(v: f64, digits: usize) -> f64 {
    format!("{v:.digits$}").parse::<f64>().unwrap_or(v)
}

#[cfg(test)]
mod tests {
    use super::coerce;
    use crate::types::{DataType, Value};

    #[test]
    fn currency_strips_symbols_and_rounds_to_cents() {
        assert_eq!(coerce("$1,234.50", DataType::Currency), Some(Value::Float(1234.5)));
        assert_eq!(coerce("19.999", DataType::Currency), Some(Value::Float(20.0)));
    }

    #[test]
    fn sentinels_are_absent_for_every_type() {
        for dt in [
            DataType::Int,
            DataType::Float,
            DataType::Currency,
            DataType::Boolean,
            DataType::String,
            DataType::List,
        ] {
            assert_eq!(coerce("", dt), None, "{dt:?}");
            assert_eq!(coerce("-1", dt), None, "{dt:?}");
            assert_eq!(coerce("   ", dt), None, "{dt:?}");
        }
    }

    #[test]
    fn space_after_currency_sign_still_parses() {
        assert_eq!(coerce("$ 1,234", DataType::Int), Some(Value::Int(1234)));
        assert_eq!(coerce("$ 5.50", DataType::Currency), Some(Value::Float(5.5)));
        assert_eq!(coerce("$ ", DataType::Float), None);
    }

    #[test]
    fn int_truncates_parsed_float() {
        assert_eq!(coerce("1,400,000,000", DataType::Int), Some(Value::Int(1_400_000_000)));
        assert_eq!(coerce("98.9", DataType::Int), Some(Value::Int(98)));
        assert_eq!(coerce("-2.5", DataType::Int), Some(Value::Int(-2)));
        assert_eq!(coerce("n/a", DataType::Int), None);
    }

    #[test]
    fn float_rounds_to_six_places() {
        assert_eq!(coerce("41.87194", DataType::Float), Some(Value::Float(41.87194)));
        assert_eq!(coerce("0.12345678", DataType::Float), Some(Value::Float(0.123457)));
        assert_eq!(coerce("abc", DataType::Float), None);
    }

    #[test]
    fn boolean_is_never_absent() {
        assert_eq!(coerce("TRUE", DataType::Boolean), Some(Value::Bool(true)));
        assert_eq!(coerce("yes", DataType::Boolean), Some(Value::Bool(true)));
        assert_eq!(coerce("1", DataType::Boolean), Some(Value::Bool(true)));
        assert_eq!(coerce("false", DataType::Boolean), Some(Value::Bool(false)));
        assert_eq!(coerce("maybe", DataType::Boolean), Some(Value::Bool(false)));
    }

    #[test]
    fn text_is_trimmed_but_otherwise_unchanged() {
        assert_eq!(
            coerce("  Drama, Crime ", DataType::List),
            Some(Value::Str("Drama, Crime".to_string()))
        );
        assert_eq!(coerce("$5", DataType::String), Some(Value::Str("$5".to_string())));
    }
}
