use chartprep::format_magnitude;
use chartprep::viz::NumberFormat;
use chartprep::viz::format::FormatterHook;

#[test]
fn magnitude_thresholds() {
    assert_eq!(format_magnitude(999.0), "999");
    assert_eq!(format_magnitude(1500.0), "1.5K");
    assert_eq!(format_magnitude(2_300_000.0), "2.3M");
    assert_eq!(format_magnitude(4_000_000_000.0), "4.0B");
    assert_eq!(format_magnitude(1000.0), "1.0K");
    assert_eq!(format_magnitude(999_999.0), "1000.0K");
    assert_eq!(format_magnitude(12.5), "12.5");
}

#[test]
fn large_negatives_are_not_abbreviated() {
    assert_eq!(format_magnitude(-2_000_000_000.0), "-2000000000");
    assert_eq!(format_magnitude(-1500.0), "-1500");
}

#[test]
fn plain_format_leaves_numbers_alone() {
    assert_eq!(NumberFormat::Plain.format(1500.0), "1500");
    assert_eq!(NumberFormat::Magnitude.format(1500.0), "1.5K");
    assert_eq!(NumberFormat::from_flag(false), NumberFormat::Plain);
}

#[test]
fn client_functions_mirror_the_host_steps() {
    let f = NumberFormat::Magnitude
        .client_function(FormatterHook::AxisLabel)
        .unwrap();
    assert_eq!(f.args, "value");
    for suffix in ["'B'", "'M'", "'K'"] {
        assert!(f.body.contains(suffix), "{}", f.body);
    }
    assert!(f.body.contains("toFixed(1)"));

    let tooltip = NumberFormat::Magnitude
        .client_function(FormatterHook::AxisTooltip)
        .unwrap();
    assert!(tooltip.body.contains("params.forEach"));
    assert!(tooltip.body.contains("seriesName"));

    let item = NumberFormat::Magnitude
        .client_function(FormatterHook::ItemTooltip)
        .unwrap();
    assert!(item.body.contains("params.percent"));
}
