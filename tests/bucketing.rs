use chartprep::aggregate::{AggregatedRow, AggregatedSeries};
use chartprep::viz::SeriesData;
use chartprep::{
    CategoryBucket, ChartConfig, ChartKind, ChartRenderer, Dataset, RenderSettings, bucket_others,
};
use serde_json::json;

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
fn total_is_preserved_when_positive() {
    let inputs: [&[(&str, f64)]; 3] = [
        &[("a", 50.0), ("b", 1.0), ("c", 2.0), ("d", 47.0)],
        &[("a", 1.0), ("b", 1.0), ("c", 1.0)],
        &[("big", 1_000_000.0), ("tiny", 0.5), ("small", 3.0)],
    ];
    for input in inputs {
        let total: f64 = input.iter().map(|(_, v)| v).sum();
        for threshold in [0.0, 0.01, 0.05, 0.3, 0.9] {
            let out = bucket_others(&series(input), threshold, "Others").unwrap();
            let sum: f64 = out.iter().map(|b| b.value).sum();
            assert_eq!(sum, total, "{input:?} at {threshold}");
        }
    }
}

#[test]
fn total_is_preserved_within_rounding_for_inexact_values() {
    let input = [
        ("a", 0.1),
        ("b", 10.0),
        ("c", 0.2),
        ("d", 10.0),
        ("e", 0.3),
        ("f", 7.7),
        ("g", 0.07),
    ];
    let total: f64 = input.iter().map(|(_, v)| v).sum();
    for threshold in [0.01, 0.05, 0.3] {
        let out = bucket_others(&series(&input), threshold, "Others").unwrap();
        let sum: f64 = out.iter().map(|b| b.value).sum();
        assert!((sum - total).abs() <= 1e-9 * total, "{sum} vs {total} at {threshold}");
    }
}

#[test]
fn nothing_below_threshold_leaves_input_unchanged() {
    let input = [("a", 40.0), ("b", 35.0), ("c", 25.0)];
    let out = bucket_others(&series(&input), 0.2, "Others").unwrap();
    let expected: Vec<CategoryBucket> = input.iter().map(|(k, v)| CategoryBucket::new(*k, *v)).collect();
    assert_eq!(out, expected);
}

#[test]
fn small_slices_are_folded_into_a_trailing_entry() {
    let out = bucket_others(&series(&[("a", 2.0), ("b", 90.0), ("c", 3.0), ("d", 5.0)]), 0.04, "Rest")
        .unwrap();
    assert_eq!(
        out,
        vec![
            CategoryBucket::new("b", 90.0),
            CategoryBucket::new("d", 5.0),
            CategoryBucket::new("Rest", 5.0),
        ]
    );
}

#[test]
fn pie_with_threshold_half_matches_expected_output() {
    let data = Dataset::from_json(&json!([
        {"region": "A", "sales": 10},
        {"region": "A", "sales": 5},
        {"region": "B", "sales": 1},
    ]))
    .unwrap();
    let cfg = ChartConfig::new("p", ChartKind::Pie, "Share", &["region"], &["sales"]);
    let settings = RenderSettings {
        threshold: 0.5,
        ..RenderSettings::default()
    };
    let series = ChartRenderer::new(cfg, &data).with_settings(settings).series().unwrap();
    assert_eq!(
        series,
        SeriesData::Proportion {
            slices: vec![CategoryBucket::new("A", 15.0), CategoryBucket::new("Others", 1.0)]
        }
    );
}

#[test]
fn pie_with_two_value_columns_fails_before_aggregation() {
    // `v2` holds text, so aggregation would fail with a different error kind.
    let data = Dataset::from_json(&json!([{"r": "x", "v": 1, "v2": "oops"}])).unwrap();
    let cfg = ChartConfig::new("p", ChartKind::Pie, "Share", &["r"], &["v", "v2"]);
    let err = ChartRenderer::new(cfg, &data).render_html().unwrap_err();
    assert!(err.is_configuration(), "{err:?}");
    assert_eq!(err.to_string(), "pie chart render to HTML failed");
}

#[test]
fn negative_threshold_is_rejected() {
    let err = bucket_others(&series(&[("a", 1.0)]), -0.1, "Others").unwrap_err();
    assert!(err.is_configuration());
}
