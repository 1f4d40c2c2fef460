//! Engine-neutral presentation options and the shared assembly step.
//!
//! `base_options` turns a `ChartConfig` plus `AssemblyFlags` into a complete
//! `RenderOptions`; `assemble` then hands it to the per-kind step in
//! `bar`/`line`/`pie` and applies caller overrides from `RenderSettings`.
//! Nothing here knows about the engine's option schema; `engine` does the
//! translation.

use super::format::{ClientFunction, NumberFormat};
use super::types::{IMAGE_MIN_FONT_SIZE, IMAGE_MIN_LABEL_MARGIN, RenderSettings, SecondaryAxis};
use super::util::{default_palette, validate_palette};
use super::{bar, line, pie};
use crate::error::ChartError;
use crate::models::{ChartConfig, ChartKind, PointerKind};
use std::fmt;

/// Which parts of the base option set to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyFlags {
    pub include_axis: bool,
    pub include_toolbox: bool,
    pub include_datazoom: bool,
    /// Raster export: fixed canvas, no interactive controls, no animation.
    pub for_image: bool,
    /// Canvas width used when `for_image` is set.
    pub image_width_px: u32,
}

impl AssemblyFlags {
    /// Embeddable interactive chart.
    pub fn interactive() -> Self {
        Self {
            include_axis: true,
            include_toolbox: true,
            include_datazoom: true,
            for_image: false,
            image_width_px: super::types::DEFAULT_IMAGE_WIDTH_PX,
        }
    }

    /// Page destined for the headless snapshot.
    pub fn image(width_px: u32) -> Self {
        Self {
            include_axis: true,
            include_toolbox: false,
            include_datazoom: false,
            for_image: true,
            image_width_px: width_px,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasWidth {
    Percent(u32),
    Pixels(u32),
}

impl fmt::Display for CanvasWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasWidth::Percent(p) => write!(f, "{p}%"),
            CanvasWidth::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: CanvasWidth,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendOptions {
    pub show: bool,
    pub top: Option<String>,
    pub left: Option<String>,
    /// Paged legend for many entries.
    pub scroll: bool,
    pub vertical: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipTrigger {
    /// One tooltip for every series at the hovered category.
    Axis,
    /// One tooltip per hovered item (pie slices).
    Item,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipOptions {
    pub show: bool,
    pub trigger: TooltipTrigger,
    pub pointer: PointerKind,
    pub format: NumberFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisOptions {
    pub show: bool,
    pub show_label: bool,
    pub show_split_line: bool,
    pub name: Option<String>,
    pub font_size: Option<u32>,
    pub margin: Option<u32>,
    pub rotate: Option<i32>,
    pub format: NumberFormat,
    /// Pin the axis minimum to zero; the maximum stays automatic.
    pub min_zero: bool,
    pub line_width: Option<f64>,
}

impl AxisOptions {
    fn category(config: &ChartConfig) -> Self {
        Self {
            show: config.show_x_axis,
            show_label: config.show_x_label,
            show_split_line: config.show_grid,
            name: config.x_label.clone(),
            font_size: None,
            margin: None,
            rotate: None,
            format: NumberFormat::Plain,
            min_zero: false,
            line_width: None,
        }
    }

    fn value(config: &ChartConfig, for_image: bool) -> Self {
        let (font_size, margin, rotate) = if for_image {
            (
                config.y_axis_font_size.max(IMAGE_MIN_FONT_SIZE),
                config.y_axis_margin.max(IMAGE_MIN_LABEL_MARGIN),
                Some(0),
            )
        } else {
            (config.y_axis_font_size, config.y_axis_margin, None)
        };
        Self {
            show: config.show_y_axis,
            show_label: config.show_y_label,
            show_split_line: config.show_grid,
            name: config.y_label.clone(),
            font_size: Some(font_size),
            margin: Some(margin),
            rotate,
            format: NumberFormat::from_flag(config.format_large_numbers),
            min_zero: false,
            line_width: Some(1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagicKind {
    Line,
    Bar,
    Stack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolboxOptions {
    /// Chart-type toggle entries.
    pub magic_types: Vec<MagicKind>,
    pub save_as_image: bool,
}

/// Slider plus inside-canvas zoom, both over the same window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomOptions {
    pub start: f64,
    pub end: f64,
    pub slider: SliderPlacement,
}

/// Slider box edges, as CSS-style offsets within the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderPlacement {
    pub top: &'static str,
    pub bottom: &'static str,
    /// Left and right inset.
    pub inset: &'static str,
}

impl Default for SliderPlacement {
    fn default() -> Self {
        Self {
            top: "88%",
            bottom: "5%",
            inset: "10%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieRadius {
    Disc(&'static str),
    Ring(&'static str, &'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesStyle {
    Bar {
        show_label: bool,
        label_format: NumberFormat,
    },
    Line {
        show_symbol: bool,
        symbol_size: u32,
        /// Fade other series while one is hovered.
        focus_series: bool,
        /// Line width of the hovered series.
        emphasis_width: u32,
    },
    Pie {
        radius: PieRadius,
        show_label: bool,
        label_template: &'static str,
    },
}

impl SeriesStyle {
    fn for_kind(kind: ChartKind) -> Self {
        match kind {
            ChartKind::Bar => SeriesStyle::Bar {
                show_label: false,
                label_format: NumberFormat::Plain,
            },
            ChartKind::Line => SeriesStyle::Line {
                show_symbol: true,
                symbol_size: 4,
                focus_series: false,
                emphasis_width: 2,
            },
            ChartKind::Pie => SeriesStyle::Pie {
                radius: PieRadius::Disc(pie::DISC_RADIUS),
                show_label: false,
                label_template: pie::LABEL_TEMPLATE,
            },
        }
    }
}

/// Client-side event handler attached to the chart instance after init.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptHook {
    pub event: &'static str,
    pub handler: ClientFunction,
}

/// Full presentation of one chart, independent of the series values.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub kind: ChartKind,
    pub canvas: Canvas,
    pub animation: bool,
    /// Empty when the title is hidden.
    pub title: String,
    pub legend: LegendOptions,
    pub tooltip: TooltipOptions,
    pub category_axis: Option<AxisOptions>,
    pub value_axis: Option<AxisOptions>,
    pub secondary_axis: Option<SecondaryAxis>,
    /// Category axis drawn vertically.
    pub horizontal: bool,
    pub toolbox: Option<ToolboxOptions>,
    pub data_zoom: Option<ZoomOptions>,
    pub palette: Vec<String>,
    pub series: SeriesStyle,
    pub hooks: Vec<ScriptHook>,
}

/// Options shared by every chart kind.
pub fn base_options(config: &ChartConfig, flags: &AssemblyFlags) -> RenderOptions {
    let title = if config.show_title {
        config.title.to_uppercase()
    } else {
        String::new()
    };
    let canvas = Canvas {
        width: if flags.for_image {
            CanvasWidth::Pixels(flags.image_width_px)
        } else {
            CanvasWidth::Percent(100)
        },
        height: config.size.height,
    };
    let (category_axis, value_axis) = if flags.include_axis {
        (
            Some(AxisOptions::category(config)),
            Some(AxisOptions::value(config, flags.for_image)),
        )
    } else {
        (None, None)
    };
    let toolbox = (flags.include_toolbox && !flags.for_image).then(|| ToolboxOptions {
        magic_types: vec![MagicKind::Line, MagicKind::Bar, MagicKind::Stack],
        save_as_image: true,
    });
    let data_zoom = (flags.include_datazoom && !flags.for_image).then(|| ZoomOptions {
        start: config.datazoom_range.0,
        end: config.datazoom_range.1,
        slider: SliderPlacement::default(),
    });

    RenderOptions {
        kind: config.kind,
        canvas,
        animation: !flags.for_image,
        title,
        legend: LegendOptions {
            show: config.show_legend,
            top: Some("20px".to_string()),
            left: None,
            scroll: false,
            vertical: false,
        },
        tooltip: TooltipOptions {
            show: config.show_tooltip,
            trigger: TooltipTrigger::Axis,
            pointer: config.tooltip_pointer,
            format: NumberFormat::from_flag(config.format_large_numbers),
        },
        category_axis,
        value_axis,
        secondary_axis: None,
        horizontal: false,
        toolbox,
        data_zoom,
        palette: default_palette(config.kind),
        series: SeriesStyle::for_kind(config.kind),
        hooks: Vec::new(),
    }
}

/// Base options, the kind-specific step, then caller overrides.
pub fn assemble(
    config: &ChartConfig,
    settings: &RenderSettings,
    flags: &AssemblyFlags,
) -> Result<RenderOptions, ChartError> {
    let mut options = base_options(config, flags);
    match config.kind {
        ChartKind::Bar => bar::customize(&mut options, config, settings, flags),
        ChartKind::Line => line::customize(&mut options, config, settings, flags),
        ChartKind::Pie => pie::customize(&mut options, config, settings, flags),
    }
    if let Some(palette) = &settings.palette {
        validate_palette(palette)?;
        options.palette = palette.clone();
    }
    if let Some(extra) = &settings.secondary_axis {
        if options.value_axis.is_none() {
            return Err(ChartError::config(format!(
                "{} chart has no value axis to extend",
                config.kind
            )));
        }
        options.secondary_axis = Some(extra.clone());
    }
    log::debug!(
        "assembled {} options for '{}' (image: {})",
        config.kind,
        config.id,
        flags.for_image
    );
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ChartConfig {
        ChartConfig::new("c", ChartKind::Bar, "Monthly sales", &["month"], &["sales"])
    }

    #[test]
    fn title_is_uppercased_or_blank() {
        let mut c = cfg();
        assert_eq!(base_options(&c, &AssemblyFlags::interactive()).title, "MONTHLY SALES");
        c.show_title = false;
        assert_eq!(base_options(&c, &AssemblyFlags::interactive()).title, "");
    }

    #[test]
    fn image_mode_floors_label_metrics_and_drops_controls() {
        let mut c = cfg();
        c.y_axis_font_size = 10;
        c.y_axis_margin = 30;
        let o = base_options(&c, &AssemblyFlags::image(1200));
        let v = o.value_axis.unwrap();
        assert_eq!((v.font_size, v.margin, v.rotate), (Some(14), Some(30), Some(0)));
        assert!(o.toolbox.is_none() && o.data_zoom.is_none());
        assert!(!o.animation);
        assert_eq!(o.canvas.width.to_string(), "1200px");
    }

    #[test]
    fn for_image_wins_over_include_flags() {
        let flags = AssemblyFlags {
            include_toolbox: true,
            include_datazoom: true,
            ..AssemblyFlags::image(800)
        };
        let o = base_options(&cfg(), &flags);
        assert!(o.toolbox.is_none() && o.data_zoom.is_none());
    }

    #[test]
    fn axes_are_omitted_on_request() {
        let flags = AssemblyFlags {
            include_axis: false,
            ..AssemblyFlags::interactive()
        };
        let o = base_options(&cfg(), &flags);
        assert!(o.category_axis.is_none() && o.value_axis.is_none());
    }
}
