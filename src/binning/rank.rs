//! Rank-based equal-count buckets with caller-fixed labels.
//!
//! Unlike [`super::quantile`], bucket boundaries here are actual data points: the sorted values
//! are cut into `n` consecutive slices whose sizes differ by at most one, and each bucket spans
//! the first and last value of its slice. This suits columns where the labels are fixed words
//! ("Indie" .. "Mega-Hit") rather than numeric ranges.

/// Split the values into at most `n` equal-count buckets, returned as `(low, high)` pairs.
///
/// The first `len % n` buckets receive one extra value. Fewer than `n` buckets are returned when
/// there are fewer than `n` values.
pub fn rank_buckets(values: &[f64], n: usize) -> Vec<(f64, f64)> {
    let mut clean: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if clean.is_empty() || n == 0 {
        return Vec::new();
    }
    clean.sort_by(f64::total_cmp);

    let size = clean.len() / n;
    let remainder = clean.len() % n;
    let mut buckets = Vec::with_capacity(n);
    let mut idx = 0;
    for i in 0..n {
        if idx >= clean.len() {
            break;
        }
        let take = size + usize::from(i < remainder);
        let low = clean[idx];
        let high = clean[(idx + take).saturating_sub(1).min(clean.len() - 1)];
        buckets.push((low, high));
        idx += take;
    }
    buckets
}

/// Label for `value`: the first bucket whose upper bound is >= `value`, falling back to the
/// last bucket. Absent values (and an empty bucket list) yield `""`.
pub fn assign_rank_bucket<'a, S: AsRef<str>>(
    value: Option<f64>,
    buckets: &[(f64, f64)],
    labels: &'a [S],
) -> &'a str {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "";
    };
    if buckets.is_empty() {
        return "";
    }
    let last = buckets.len() - 1;
    let idx = buckets
        .iter()
        .position(|(_, high)| value <= *high)
        .unwrap_or(last);
    labels.get(idx).map(|s| s.as_ref()).unwrap_or("")
}

/// Bucket a column into `labels.len()` equal-count groups and label every row.
pub fn categorize_with_labels<S: AsRef<str>>(values: &[Option<f64>], labels: &[S]) -> Vec<String> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let buckets = rank_buckets(&present, labels.len());
    values
        .iter()
        .map(|v| assign_rank_bucket(*v, &buckets, labels).to_string())
        .collect()
}
