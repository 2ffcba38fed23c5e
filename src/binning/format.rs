//! Compact number formatting for bucket labels.

/// Format a number compactly: `1.2K`, `3.4M`, `5.6B`, `7.8T`.
///
/// Magnitudes below one thousand are printed as a whole number. Sign is preserved.
/// From `1e15` upward the label uses exponent notation instead: `1.8e308`.
pub fn fmt_compact(n: f64) -> String {
    let abs_n = n.abs();
    if abs_n >= 1e15 {
        format!("{n:.1e}")
    } else if abs_n >= 1e12 {
        format!("{:.1}T", n / 1e12)
    } else if abs_n >= 1e9 {
        format!("{:.1}B", n / 1e9)
    } else if abs_n >= 1e6 {
        format!("{:.1}M", n / 1e6)
    } else if abs_n >= 1e3 {
        format!("{:.1}K", n / 1e3)
    } else {
        format!("{n:.0}")
    }
}

/// Truncate to an integer and insert `,` thousands separators: `1234567.8` -> `1,234,567`.
pub fn fmt_grouped(n: f64) -> String {
    let whole = n.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Column-specific wrapping applied around compact boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStyle {
    /// `1.2M-3.4M`
    Compact,
    /// `$1.2B-$3.4B`
    Currency,
    /// `1.2K-3.4K km²`
    Area,
    /// `12-340 /km²`
    Density,
    /// `1,200-3,400`
    Grouped,
}

impl RangeStyle {
    /// Render the label for a bucket spanning `low..=high`.
    pub fn label(&self, low: f64, high: f64) -> String {
        match self {
            RangeStyle::Compact => format!("{}-{}", fmt_compact(low), fmt_compact(high)),
            RangeStyle::Currency => format!("${}-${}", fmt_compact(low), fmt_compact(high)),
            RangeStyle::Area => format!("{}-{} km²", fmt_compact(low), fmt_compact(high)),
            RangeStyle::Density => format!("{}-{} /km²", fmt_compact(low), fmt_compact(high)),
            RangeStyle::Grouped => format!("{}-{}", fmt_grouped(low), fmt_grouped(high)),
        }
    }

    /// Adapter matching the binner's `(low, high, index, total)` label callback.
    pub fn label_fn(self) -> impl Fn(f64, f64, usize, usize) -> String {
        move |low, high, _index, _total| self.label(low, high)
    }
}
