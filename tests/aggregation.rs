use chartprep::dataset::{Cell, Dataset};
use chartprep::{ChartConfig, ChartKind, ChartRenderer, aggregate};
use serde_json::json;
use std::collections::HashMap;

fn sales() -> Dataset {
    Dataset::from_json(&json!([
        {"region": "A", "sales": 10},
        {"region": "A", "sales": 5},
        {"region": "B", "sales": 1},
    ]))
    .unwrap()
}

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn category_chart_sums_per_region() {
    let agg = aggregate(&sales(), &cols(&["region"]), &cols(&["sales"])).unwrap();
    assert_eq!(agg.pairs(), vec![("A".to_string(), 15.0), ("B".to_string(), 1.0)]);
}

#[test]
fn one_row_per_distinct_category_with_matching_sums() {
    let regions = ["n", "s", "e", "w", "s", "n", "n", "e"];
    let mut data = Dataset::new(["region", "v"]).unwrap();
    let mut expected: HashMap<&str, f64> = HashMap::new();
    for (i, r) in regions.iter().enumerate() {
        let v = (i * 3 + 1) as f64;
        data.push_row(vec![Cell::from(*r), Cell::from(v)]).unwrap();
        *expected.entry(*r).or_default() += v;
    }
    let agg = aggregate(&data, &cols(&["region"]), &cols(&["v"])).unwrap();
    assert_eq!(agg.len(), expected.len());
    for (key, sum) in agg.pairs() {
        assert_eq!(expected[key.as_str()], sum, "sum for {key}");
    }
}

#[test]
fn multi_column_keys_join_with_dash_in_column_order() {
    let data = Dataset::from_json(&json!([
        {"year": 2024, "region": "A", "v": 1},
        {"year": 2024, "region": "A", "v": 2},
        {"year": 2023, "region": "B", "v": 4},
    ]))
    .unwrap();
    let agg = aggregate(&data, &cols(&["year", "region"]), &cols(&["v"])).unwrap();
    assert_eq!(agg.categories(), vec!["2023 - B", "2024 - A"]);
    assert_eq!(agg.column("v").unwrap(), vec![4.0, 3.0]);

    let agg = aggregate(&data, &cols(&["region", "year"]), &cols(&["v"])).unwrap();
    assert_eq!(agg.categories(), vec!["A - 2024", "B - 2023"]);
}

#[test]
fn numeric_categories_sort_numerically() {
    let data = Dataset::from_json(&json!([
        {"k": 10, "v": 1}, {"k": 9, "v": 1}, {"k": 100, "v": 1},
    ]))
    .unwrap();
    let agg = aggregate(&data, &cols(&["k"]), &cols(&["v"])).unwrap();
    assert_eq!(agg.categories(), vec!["9", "10", "100"]);
}

#[test]
fn several_value_columns_are_summed_independently() {
    let data = Dataset::from_json(&json!([
        {"r": "x", "a": 1, "b": 10},
        {"r": "x", "a": 2, "b": 20},
        {"r": "y", "a": 3, "b": null},
    ]))
    .unwrap();
    let agg = aggregate(&data, &cols(&["r"]), &cols(&["a", "b"])).unwrap();
    assert_eq!(agg.column("a").unwrap(), vec![3.0, 3.0]);
    assert_eq!(agg.column("b").unwrap(), vec![30.0, 0.0]);
}

#[test]
fn null_categories_are_dropped() {
    let data = Dataset::from_json(&json!([
        {"r": "x", "v": 1}, {"r": null, "v": 100},
    ]))
    .unwrap();
    let agg = aggregate(&data, &cols(&["r"]), &cols(&["v"])).unwrap();
    assert_eq!(agg.pairs(), vec![("x".to_string(), 1.0)]);
}

#[test]
fn text_in_value_column_is_an_aggregation_error() {
    let data = Dataset::from_json(&json!([{"r": "x", "v": "lots"}])).unwrap();
    let err = aggregate(&data, &cols(&["r"]), &cols(&["v"])).unwrap_err();
    assert!(err.is_aggregation(), "{err}");
}

#[test]
fn unknown_column_is_a_configuration_error() {
    let err = aggregate(&sales(), &cols(&["country"]), &cols(&["sales"])).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("country"));
}

#[test]
fn empty_axes_are_inferred_from_column_types() {
    let data = Dataset::from_json(&json!([
        {"day": "2024-01-01", "label": "a", "v": 1},
        {"day": "2024-01-02", "label": "b", "v": 2},
    ]))
    .unwrap();
    let mut cfg = ChartConfig::new("c", ChartKind::Line, "t", &[], &[]);
    cfg.infer_default_axes(&data);
    assert_eq!(cfg.x_axis, vec!["day"]);
    assert_eq!(cfg.y_axis, vec!["v"]);

    let no_dates = sales();
    let mut cfg = ChartConfig::new("c", ChartKind::Bar, "t", &[], &[]);
    cfg.infer_default_axes(&no_dates);
    assert_eq!(cfg.x_axis, vec!["region"]);
    assert_eq!(cfg.y_axis, vec!["sales"]);
}

#[test]
fn renderer_exposes_the_prepared_series() {
    let data = sales();
    let cfg = ChartConfig::new("c", ChartKind::Bar, "Sales", &["region"], &["sales"]);
    let series = ChartRenderer::new(cfg, &data).series().unwrap();
    match series {
        chartprep::viz::SeriesData::Categorical { categories, series } => {
            assert_eq!(categories, vec!["A", "B"]);
            assert_eq!(series[0].name, "sales");
            assert_eq!(series[0].values, vec![15.0, 1.0]);
        }
        other => panic!("unexpected {other:?}"),
    }
}
