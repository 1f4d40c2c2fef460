//! Translation of `RenderOptions` + `SeriesData` into an ECharts option (via
//! `charming`) and the HTML that boots it in a page.
//!
//! `charming` builds the option model. Settings its builders do not cover are
//! written into the serialized option afterwards, and formatter functions are
//! carried as placeholder strings until the final source is produced.

use super::format::{ClientFunction, FormatterHook, NumberFormat};
use super::options::{
    AxisOptions, LegendOptions, MagicKind, PieRadius, RenderOptions, SeriesStyle, ToolboxOptions,
    TooltipOptions, TooltipTrigger,
};
use super::text::{escape_html, escape_inline_script};
use super::types::{SecondaryAxis, SeriesData};
use crate::error::ChartError;
use crate::models::PointerKind;
use charming::{
    Chart,
    component::{
        Axis, DataZoom, DataZoomType, Feature, Legend, LegendType, MagicType, MagicTypeType,
        SaveAsImage, Title, Toolbox,
    },
    element::{
        AxisLabel, AxisLine, AxisLineStyle, AxisPointer, AxisPointerType, AxisType, Color,
        Emphasis, EmphasisFocus, Label, Orient, SplitLine, Tooltip, Trigger,
    },
    series::{Bar, Line, Pie},
};
use serde_json::{Value, json};

const FUNCTION_MARK: &str = "__chartprep_fn_";

/// Client functions referenced from the option by placeholder string.
#[derive(Debug, Default)]
pub struct ClientFunctions(Vec<ClientFunction>);

impl ClientFunctions {
    /// Register `f`; the returned placeholder goes where the function belongs.
    fn slot(&mut self, f: ClientFunction) -> String {
        self.0.push(f);
        format!("{FUNCTION_MARK}{}__", self.0.len() - 1)
    }

    /// Swap every quoted placeholder in `json` for its function source.
    fn inline(&self, json: String) -> String {
        self.0.iter().enumerate().fold(json, |src, (i, f)| {
            src.replace(&format!("\"{FUNCTION_MARK}{i}__\""), &f.source())
        })
    }
}

fn title(options: &RenderOptions) -> Title {
    Title::new().text(options.title.as_str())
}

fn legend(l: &LegendOptions) -> Legend {
    let mut legend = Legend::new().show(l.show);
    if let Some(top) = &l.top {
        legend = legend.top(top.as_str());
    }
    if let Some(left) = &l.left {
        legend = legend.left(left.as_str());
    }
    if l.scroll {
        legend = legend.type_(LegendType::Scroll);
    }
    if l.vertical {
        legend = legend.orient(Orient::Vertical);
    }
    legend
}

fn tooltip(t: &TooltipOptions, functions: &mut ClientFunctions) -> Tooltip {
    let (trigger, hook) = match t.trigger {
        TooltipTrigger::Axis => (Trigger::Axis, FormatterHook::AxisTooltip),
        TooltipTrigger::Item => (Trigger::Item, FormatterHook::ItemTooltip),
    };
    let pointer = match t.pointer {
        PointerKind::Cross => AxisPointerType::Cross,
        PointerKind::Line => AxisPointerType::Line,
        PointerKind::Shadow => AxisPointerType::Shadow,
    };
    let mut tooltip = Tooltip::new().trigger(trigger);
    if t.trigger == TooltipTrigger::Axis {
        tooltip = tooltip.axis_pointer(AxisPointer::new().type_(pointer));
    }
    if let Some(f) = t.format.client_function(hook) {
        tooltip = tooltip.formatter(functions.slot(f).as_str());
    }
    tooltip
}

fn toolbox(t: &ToolboxOptions) -> Toolbox {
    let types = t
        .magic_types
        .iter()
        .map(|m| match m {
            MagicKind::Line => MagicTypeType::Line,
            MagicKind::Bar => MagicTypeType::Bar,
            MagicKind::Stack => MagicTypeType::Stack,
        })
        .collect::<Vec<_>>();
    let mut feature = Feature::new().magic_type(MagicType::new().type_(types));
    if t.save_as_image {
        feature = feature.save_as_image(SaveAsImage::new());
    }
    Toolbox::new().feature(feature)
}

fn axis_label(a: &AxisOptions, functions: &mut ClientFunctions) -> AxisLabel {
    let mut label = AxisLabel::new().show(a.show_label);
    if let Some(size) = a.font_size {
        label = label.font_size(f64::from(size));
    }
    if let Some(rotate) = a.rotate {
        label = label.rotate(f64::from(rotate));
    }
    if let Some(f) = a.format.client_function(FormatterHook::AxisLabel) {
        label = label.formatter(functions.slot(f).as_str());
    }
    label
}

fn axis(a: &AxisOptions, kind: AxisType, functions: &mut ClientFunctions) -> Axis {
    let mut axis = Axis::new()
        .type_(kind)
        .show(a.show)
        .axis_label(axis_label(a, functions))
        .split_line(SplitLine::new().show(a.show_split_line));
    if let Some(name) = &a.name {
        axis = axis.name(name.as_str());
    }
    if let Some(width) = a.line_width {
        axis = axis.axis_line(AxisLine::new().line_style(AxisLineStyle::new().width(width)));
    }
    if a.min_zero {
        axis = axis.min(0);
    }
    axis
}

fn secondary_axis(extra: &SecondaryAxis) -> Axis {
    let template = format!("{{value}} {}", extra.label_suffix);
    Axis::new()
        .type_(AxisType::Value)
        .name(extra.name.as_str())
        .axis_label(AxisLabel::new().formatter(template.as_str()))
}

fn data_zoom(options: &RenderOptions) -> Vec<DataZoom> {
    let Some(z) = options.data_zoom else {
        return Vec::new();
    };
    vec![
        DataZoom::new()
            .type_(DataZoomType::Slider)
            .orient(Orient::Horizontal)
            .start(z.start)
            .end(z.end)
            .top(z.slider.top)
            .bottom(z.slider.bottom)
            .left(z.slider.inset)
            .right(z.slider.inset),
        DataZoom::new().type_(DataZoomType::Inside).start(z.start).end(z.end),
    ]
}

/// Build the engine chart for one render; formatters are left as placeholders
/// registered in `functions`.
pub fn build_chart(
    options: &RenderOptions,
    data: &SeriesData,
    functions: &mut ClientFunctions,
) -> Chart {
    let colors: Vec<Color> = options
        .palette
        .iter()
        .map(|c| Color::from(c.as_str()))
        .collect();
    let mut chart = Chart::new()
        .title(title(options))
        .legend(legend(&options.legend))
        .tooltip(tooltip(&options.tooltip, functions))
        .color(colors);

    if let Some(t) = &options.toolbox {
        chart = chart.toolbox(toolbox(t));
    }
    for zoom in data_zoom(options) {
        chart = chart.data_zoom(zoom);
    }

    match data {
        SeriesData::Categorical { categories, series } => {
            let cat = options
                .category_axis
                .as_ref()
                .map(|a| axis(a, AxisType::Category, functions).data(categories.clone()));
            let val = options
                .value_axis
                .as_ref()
                .map(|a| axis(a, AxisType::Value, functions));
            let extra = options.secondary_axis.as_ref().map(secondary_axis);
            if options.horizontal {
                if let Some(v) = val {
                    chart = chart.x_axis(v);
                }
                if let Some(e) = extra {
                    chart = chart.x_axis(e);
                }
                if let Some(c) = cat {
                    chart = chart.y_axis(c);
                }
            } else {
                if let Some(c) = cat {
                    chart = chart.x_axis(c);
                }
                if let Some(v) = val {
                    chart = chart.y_axis(v);
                }
                if let Some(e) = extra {
                    chart = chart.y_axis(e);
                }
            }
            for s in series {
                chart = match &options.series {
                    SeriesStyle::Line {
                        show_symbol,
                        symbol_size,
                        focus_series,
                        ..
                    } => {
                        let mut line = Line::new()
                            .name(s.name.as_str())
                            .show_symbol(*show_symbol)
                            .symbol_size(f64::from(*symbol_size))
                            .data(s.values.clone());
                        if *focus_series {
                            line = line.emphasis(Emphasis::new().focus(EmphasisFocus::Series));
                        }
                        chart.series(line)
                    }
                    SeriesStyle::Bar {
                        show_label,
                        label_format,
                    } => chart.series(
                        Bar::new()
                            .name(s.name.as_str())
                            .label(series_label(*show_label, *label_format, functions))
                            .data(s.values.clone()),
                    ),
                    SeriesStyle::Pie { .. } => chart,
                };
            }
        }
        SeriesData::Proportion { slices } => {
            if let SeriesStyle::Pie {
                radius,
                show_label,
                label_template,
            } = &options.series
            {
                let pie = Pie::new()
                    .name("")
                    .label(Label::new().show(*show_label).formatter(*label_template))
                    .data(
                        slices
                            .iter()
                            .map(|b| (b.value, b.label.as_str()))
                            .collect::<Vec<_>>(),
                    );
                let pie = match radius {
                    PieRadius::Disc(r) => pie.radius(*r),
                    PieRadius::Ring(inner, outer) => pie.radius(vec![*inner, *outer]),
                };
                chart = chart.series(pie);
            }
        }
    }
    chart
}

fn series_label(show: bool, format: NumberFormat, functions: &mut ClientFunctions) -> Label {
    let label = Label::new().show(show);
    match format.client_function(FormatterHook::SeriesLabel) {
        Some(f) => label.formatter(functions.slot(f).as_str()),
        None => label,
    }
}

/// First axis under `key`: a lone axis serializes as an object, several as an array.
fn first_axis<'v>(option: &'v mut Value, key: &str) -> Option<&'v mut Value> {
    match option.get_mut(key)? {
        Value::Array(axes) => axes.first_mut(),
        axis @ Value::Object(_) => Some(axis),
        _ => None,
    }
}

/// Write the settings `charming` has no builder for into the serialized option.
fn patch_option(option: &mut Value, options: &RenderOptions) {
    if let Some(tooltip) = option.get_mut("tooltip") {
        tooltip["show"] = json!(options.tooltip.show);
    }

    let (category_key, value_key) = if options.horizontal {
        ("yAxis", "xAxis")
    } else {
        ("xAxis", "yAxis")
    };
    for (key, axis) in [
        (category_key, &options.category_axis),
        (value_key, &options.value_axis),
    ] {
        let Some(margin) = axis.as_ref().and_then(|a| a.margin) else {
            continue;
        };
        if let Some(target) = first_axis(option, key) {
            target["axisLabel"]["margin"] = json!(margin);
        }
    }

    if let SeriesStyle::Line { emphasis_width, .. } = &options.series {
        if let Some(series) = option.get_mut("series").and_then(Value::as_array_mut) {
            for s in series {
                s["emphasis"]["lineStyle"] = json!({ "width": emphasis_width, "opacity": 1 });
            }
        }
    }
}

/// ECharts option as a JSON value, formatters still as placeholders.
pub fn option_value(
    options: &RenderOptions,
    data: &SeriesData,
) -> Result<(Value, ClientFunctions), ChartError> {
    let mut functions = ClientFunctions::default();
    let chart = build_chart(options, data, &mut functions);
    let mut option = serde_json::to_value(&chart)
        .map_err(|e| ChartError::render(format!("cannot serialize chart option: {e}")))?;
    patch_option(&mut option, options);
    Ok((option, functions))
}

/// ECharts option object as JS source (functions inlined, not quoted).
pub fn option_source(options: &RenderOptions, data: &SeriesData) -> Result<String, ChartError> {
    let (option, functions) = option_value(options, data)?;
    let json = serde_json::to_string_pretty(&option)
        .map_err(|e| ChartError::render(format!("cannot serialize chart option: {e}")))?;
    Ok(functions.inline(json))
}

/// Embeddable fragment: runtime script tag, container div, init script.
pub fn html_fragment(
    element_id: &str,
    options: &RenderOptions,
    data: &SeriesData,
    echarts_src: &str,
) -> Result<String, ChartError> {
    let id = escape_html(element_id);
    let option = escape_inline_script(&option_source(options, data)?);
    let hooks: String = options
        .hooks
        .iter()
        .map(|h| {
            format!(
                "\n    chart.on('{}', function({}) {{ {} }});",
                h.event,
                h.handler.args,
                escape_inline_script(&h.handler.body)
            )
        })
        .collect();
    Ok(format!(
        r#"<script type="text/javascript" src="{src}"></script>
<div id="{id}" class="chart-container" style="width:{width}; height:{height}px;"></div>
<script>
  (function() {{
    var chart = echarts.init(document.getElementById('{id}'), null, {{renderer: 'canvas'}});
    var option = {option};
    option.animation = {animation};
    chart.setOption(option);{hooks}
    window.addEventListener('resize', function() {{ chart.resize(); }});
  }})();
</script>"#,
        src = escape_html(echarts_src),
        width = options.canvas.width,
        height = options.canvas.height,
        animation = options.animation,
    ))
}

/// Standalone page around `html_fragment`, used as the snapshot source.
pub fn html_document(
    element_id: &str,
    options: &RenderOptions,
    data: &SeriesData,
    echarts_src: &str,
) -> Result<String, ChartError> {
    let heading = if options.title.is_empty() {
        "chart".to_string()
    } else {
        escape_html(&options.title)
    };
    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{heading}</title>\n</head>\n<body style=\"margin:0\">\n{}\n</body>\n</html>\n",
        html_fragment(element_id, options, data, echarts_src)?
    ))
}
