//! Line chart overrides.

use super::options::{AssemblyFlags, RenderOptions, SeriesStyle};
use super::types::RenderSettings;
use crate::models::ChartConfig;

pub(crate) fn customize(
    options: &mut RenderOptions,
    _config: &ChartConfig,
    settings: &RenderSettings,
    _flags: &AssemblyFlags,
) {
    options.horizontal = settings.horizontal;
    if let Some(axis) = options.value_axis.as_mut() {
        axis.min_zero = true;
    }
    options.series = SeriesStyle::Line {
        show_symbol: false,
        symbol_size: 8,
        focus_series: true,
        emphasis_width: 3,
    };
}
