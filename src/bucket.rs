//! Collapse low-share categories of a single-value series into one "Others" slice.

use crate::aggregate::AggregatedSeries;
use crate::error::ChartError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: f64 = 0.05;
pub const DEFAULT_OTHERS_LABEL: &str = "Others";

/// One slice of a proportion chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub label: String,
    pub value: f64,
}

impl CategoryBucket {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Bucket `series` (which must carry exactly one value column).
///
/// Categories whose share of the total is below `threshold` are summed into a
/// trailing `others_label` slice, but only when that sum is positive. A zero
/// total leaves the data untouched.
///
/// Folding changes the order of float additions, so the output sums to the
/// input total up to rounding, not bit for bit, unless the values add exactly.
pub fn bucket_others(
    series: &AggregatedSeries,
    threshold: f64,
    others_label: &str,
) -> Result<Vec<CategoryBucket>, ChartError> {
    if series.value_columns.len() != 1 {
        return Err(ChartError::config(format!(
            "bucketing requires exactly one value column, got {}",
            series.value_columns.len()
        )));
    }
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(ChartError::config(format!(
            "threshold must be a non-negative fraction, got {threshold}"
        )));
    }

    let pairs = series.pairs();
    let total: f64 = pairs.iter().map(|(_, v)| v).sum();

    let below: Vec<bool> = if total == 0.0 {
        vec![false; pairs.len()]
    } else {
        pairs.iter().map(|(_, v)| v / total < threshold).collect()
    };
    let others_value: f64 = pairs
        .iter()
        .zip(&below)
        .filter(|(_, b)| **b)
        .map(|((_, v), _)| v)
        .sum();

    if others_value > 0.0 {
        let mut out: Vec<CategoryBucket> = pairs
            .into_iter()
            .zip(below)
            .filter(|(_, b)| !*b)
            .map(|((label, v), _)| CategoryBucket::new(label, v))
            .collect();
        log::debug!(
            "bucketed {} categories under {:.3} share into '{}'",
            series.len() - out.len(),
            threshold,
            others_label
        );
        out.push(CategoryBucket::new(others_label, others_value));
        Ok(out)
    } else {
        Ok(pairs
            .into_iter()
            .map(|(label, v)| CategoryBucket::new(label, v))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregatedRow;

    fn series(pairs: &[(&str, f64)]) -> AggregatedSeries {
        AggregatedSeries {
            category_columns: vec!["cat".into()],
            value_columns: vec!["v".into()],
            rows: pairs
                .iter()
                .map(|(k, v)| AggregatedRow {
                    key: k.to_string(),
                    values: vec![*v],
                })
                .collect(),
        }
    }

    #[test]
    fn zero_total_is_left_alone() {
        let s = series(&[("a", 0.0), ("b", 0.0)]);
        let out = bucket_others(&s, 0.5, "Others").unwrap();
        assert_eq!(out, vec![CategoryBucket::new("a", 0.0), CategoryBucket::new("b", 0.0)]);
    }

    #[test]
    fn zero_valued_small_slices_do_not_create_empty_others() {
        let s = series(&[("a", 10.0), ("b", 0.0)]);
        let out = bucket_others(&s, 0.05, "Others").unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|b| b.label != "Others"));
    }

    #[test]
    fn multi_value_series_is_rejected() {
        let mut s = series(&[("a", 1.0)]);
        s.value_columns.push("w".into());
        assert!(bucket_others(&s, 0.05, "Others").unwrap_err().is_configuration());
    }
}
