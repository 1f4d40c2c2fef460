//! Category (bar) chart overrides.

use super::format::{ClientFunction, NumberFormat};
use super::options::{AssemblyFlags, RenderOptions, ScriptHook, SeriesStyle};
use super::types::RenderSettings;
use crate::models::ChartConfig;

/// When the toolbox switches to line mode, keep hover markers and focus the hovered series.
const MAGIC_TYPE_HANDLER: &str = "if (params.currentType === 'line') { \
     var option = chart.getOption(); \
     if (option.series) { \
     option.series.forEach(function(series) { \
     series.showSymbol = true; series.symbolSize = 0; \
     series.emphasis = { focus: 'series', scale: true, symbolSize: 8 }; }); \
     chart.setOption(option); } }";

pub(crate) fn customize(
    options: &mut RenderOptions,
    config: &ChartConfig,
    settings: &RenderSettings,
    flags: &AssemblyFlags,
) {
    options.horizontal = settings.horizontal;
    if let Some(axis) = options.value_axis.as_mut() {
        axis.min_zero = true;
    }
    let label_format = if settings.show_label {
        NumberFormat::from_flag(config.format_large_numbers)
    } else {
        NumberFormat::Plain
    };
    options.series = SeriesStyle::Bar {
        show_label: settings.show_label,
        label_format,
    };
    if !flags.for_image {
        options.hooks.push(ScriptHook {
            event: "magictypechanged",
            handler: ClientFunction {
                args: "params",
                body: MAGIC_TYPE_HANDLER.to_string(),
            },
        });
    }
}
