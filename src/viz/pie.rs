//! Proportion (pie) chart overrides.

use super::options::{
    AssemblyFlags, CanvasWidth, PieRadius, RenderOptions, SeriesStyle, TooltipTrigger,
};
use super::types::RenderSettings;
use crate::models::ChartConfig;

pub(crate) const DISC_RADIUS: &str = "55%";
pub(crate) const RING_RADIUS: (&str, &str) = ("40%", "75%");
pub(crate) const LABEL_TEMPLATE: &str = "{b}: {d}%";

pub(crate) fn customize(
    options: &mut RenderOptions,
    _config: &ChartConfig,
    settings: &RenderSettings,
    flags: &AssemblyFlags,
) {
    // Pies carry no axes or interactive controls.
    options.category_axis = None;
    options.value_axis = None;
    options.toolbox = None;
    options.data_zoom = None;
    options.horizontal = false;

    if flags.for_image {
        options.canvas.width = CanvasWidth::Percent(80);
    }
    options.legend.scroll = true;
    options.legend.vertical = true;
    options.legend.top = None;
    options.legend.left = Some("80%".to_string());
    options.tooltip.trigger = TooltipTrigger::Item;

    let radius = if settings.donut {
        PieRadius::Ring(RING_RADIUS.0, RING_RADIUS.1)
    } else {
        PieRadius::Disc(DISC_RADIUS)
    };
    options.series = SeriesStyle::Pie {
        radius,
        show_label: settings.show_label,
        label_template: LABEL_TEMPLATE,
    };
}
