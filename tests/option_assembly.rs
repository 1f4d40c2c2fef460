use chartprep::viz::options::{
    AssemblyFlags, CanvasWidth, MagicKind, PieRadius, SeriesStyle, TooltipTrigger,
};
use chartprep::viz::{NumberFormat, SecondaryAxis, assemble, base_options};
use chartprep::{ChartConfig, ChartKind, PointerKind, RenderSettings};

fn bar() -> ChartConfig {
    ChartConfig::new("rev", ChartKind::Bar, "Revenue", &["quarter"], &["revenue"])
}

#[test]
fn base_options_follow_the_display_flags() {
    let mut cfg = bar();
    cfg.show_legend = false;
    cfg.show_tooltip = true;
    cfg.show_grid = true;
    cfg.show_y_label = true;
    cfg.tooltip_pointer = PointerKind::Shadow;
    cfg.datazoom_range = (0.0, 50.0);

    let o = base_options(&cfg, &AssemblyFlags::interactive());
    assert_eq!(o.title, "REVENUE");
    assert!(!o.legend.show);
    assert_eq!(o.legend.top.as_deref(), Some("20px"));
    assert!(o.tooltip.show);
    assert_eq!(o.tooltip.trigger, TooltipTrigger::Axis);
    assert_eq!(o.tooltip.pointer, PointerKind::Shadow);
    assert_eq!(o.tooltip.format, NumberFormat::Magnitude);

    let x = o.category_axis.as_ref().unwrap();
    let y = o.value_axis.as_ref().unwrap();
    assert!(x.show && !x.show_label && x.show_split_line);
    assert!(y.show && y.show_label && y.show_split_line);
    assert_eq!((y.font_size, y.margin), (Some(10), Some(8)));
    assert_eq!(y.format, NumberFormat::Magnitude);

    let toolbox = o.toolbox.as_ref().unwrap();
    assert_eq!(toolbox.magic_types, vec![MagicKind::Line, MagicKind::Bar, MagicKind::Stack]);
    assert!(toolbox.save_as_image);
    let zoom = o.data_zoom.unwrap();
    assert_eq!((zoom.start, zoom.end), (0.0, 50.0));
    assert_eq!((zoom.slider.top, zoom.slider.bottom, zoom.slider.inset), ("88%", "5%", "10%"));
    assert_eq!(o.canvas.width, CanvasWidth::Percent(100));
    assert_eq!(o.canvas.height, 300);
    assert!(o.animation);
}

#[test]
fn large_number_formatting_can_be_disabled() {
    let mut cfg = bar();
    cfg.format_large_numbers = false;
    let o = base_options(&cfg, &AssemblyFlags::interactive());
    assert_eq!(o.tooltip.format, NumberFormat::Plain);
    assert_eq!(o.value_axis.unwrap().format, NumberFormat::Plain);
}

#[test]
fn image_mode_keeps_larger_label_metrics() {
    let mut cfg = bar();
    cfg.y_axis_font_size = 18;
    cfg.y_axis_margin = 4;
    let o = base_options(&cfg, &AssemblyFlags::image(1600));
    let y = o.value_axis.unwrap();
    assert_eq!((y.font_size, y.margin), (Some(18), Some(25)));
    assert_eq!(o.canvas.width, CanvasWidth::Pixels(1600));
}

#[test]
fn bar_and_line_floor_the_value_axis_at_zero() {
    for kind in [ChartKind::Bar, ChartKind::Line] {
        let mut cfg = bar();
        cfg.kind = kind;
        let o = assemble(&cfg, &RenderSettings::default(), &AssemblyFlags::interactive()).unwrap();
        assert!(o.value_axis.unwrap().min_zero, "{kind}");
    }
}

#[test]
fn horizontal_flip_applies_to_bar_and_line() {
    let settings = RenderSettings {
        horizontal: true,
        ..RenderSettings::default()
    };
    let o = assemble(&bar(), &settings, &AssemblyFlags::interactive()).unwrap();
    assert!(o.horizontal);
}

#[test]
fn line_hides_symbols_and_focuses_series() {
    let mut cfg = bar();
    cfg.kind = ChartKind::Line;
    let o = assemble(&cfg, &RenderSettings::default(), &AssemblyFlags::interactive()).unwrap();
    assert_eq!(
        o.series,
        SeriesStyle::Line {
            show_symbol: false,
            symbol_size: 8,
            focus_series: true,
            emphasis_width: 3,
        }
    );
}

#[test]
fn pie_drops_axes_and_uses_a_scrolling_side_legend() {
    let cfg = ChartConfig::new("p", ChartKind::Pie, "Share", &["region"], &["sales"]);
    let o = assemble(&cfg, &RenderSettings::default(), &AssemblyFlags::interactive()).unwrap();
    assert!(o.category_axis.is_none() && o.value_axis.is_none());
    assert!(o.toolbox.is_none() && o.data_zoom.is_none());
    assert!(o.legend.scroll && o.legend.vertical);
    assert_eq!(o.legend.left.as_deref(), Some("80%"));
    assert_eq!(o.tooltip.trigger, TooltipTrigger::Item);
    assert!(matches!(
        o.series,
        SeriesStyle::Pie {
            radius: PieRadius::Ring("40%", "75%"),
            label_template: "{b}: {d}%",
            ..
        }
    ));
    assert_eq!(o.palette[0], "#BF9924");
}

#[test]
fn palette_override_is_validated() {
    let good = RenderSettings {
        palette: Some(vec!["#112233".into(), "#445566".into()]),
        ..RenderSettings::default()
    };
    let o = assemble(&bar(), &good, &AssemblyFlags::interactive()).unwrap();
    assert_eq!(o.palette, vec!["#112233", "#445566"]);

    let bad = RenderSettings {
        palette: Some(vec!["red".into()]),
        ..RenderSettings::default()
    };
    assert!(assemble(&bar(), &bad, &AssemblyFlags::interactive()).unwrap_err().is_configuration());
}

#[test]
fn secondary_axis_needs_a_value_axis() {
    let settings = RenderSettings {
        secondary_axis: Some(SecondaryAxis {
            name: "Weight".into(),
            label_suffix: "kg".into(),
        }),
        ..RenderSettings::default()
    };
    let o = assemble(&bar(), &settings, &AssemblyFlags::interactive()).unwrap();
    assert_eq!(o.secondary_axis.unwrap().label_suffix, "kg");

    let pie = ChartConfig::new("p", ChartKind::Pie, "Share", &["region"], &["sales"]);
    assert!(assemble(&pie, &settings, &AssemblyFlags::interactive()).is_err());
}
