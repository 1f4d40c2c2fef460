//! Public types and constants for the visualization module.

use crate::aggregate::AggregatedSeries;
use crate::bucket::{CategoryBucket, DEFAULT_OTHERS_LABEL, DEFAULT_THRESHOLD};
use std::path::PathBuf;

/// Script URL for the ECharts runtime embedded in generated HTML.
pub const DEFAULT_ECHARTS_SRC: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

/// Canvas width used when rendering for raster export.
pub const DEFAULT_IMAGE_WIDTH_PX: u32 = 1200;

/// Minimum value-axis label font size in raster output.
pub const IMAGE_MIN_FONT_SIZE: u32 = 14;

/// Minimum value-axis label margin in raster output.
pub const IMAGE_MIN_LABEL_MARGIN: u32 = 25;

/// Extra value axis drawn on the opposite side (e.g. a unit-labelled secondary scale).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryAxis {
    pub name: String,
    /// Appended to tick labels: `"{value} <suffix>"`.
    pub label_suffix: String,
}

/// Per-call rendering knobs that are not part of the chart description.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Swap category and value axes (bar/line).
    pub horizontal: bool,
    /// Draw value labels on bars / slices.
    pub show_label: bool,
    /// Pie: ring (40%–75%) instead of a full 55% disc.
    pub donut: bool,
    /// Pie: share below which categories are folded into `others_label`.
    pub threshold: f64,
    pub others_label: String,
    /// Replaces the kind's default palette.
    pub palette: Option<Vec<String>>,
    pub secondary_axis: Option<SecondaryAxis>,
    /// Leave intermediate files behind when rasterization fails.
    pub keep_temp_files_on_failure: bool,
    /// `render_png`: keep the sibling `.html` next to the image.
    pub retain_png_html: bool,
    /// Directory for `render_base64` intermediates; system temp dir when `None`.
    pub temp_dir: Option<PathBuf>,
    pub echarts_src: String,
    pub image_width_px: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            horizontal: false,
            show_label: false,
            donut: true,
            threshold: DEFAULT_THRESHOLD,
            others_label: DEFAULT_OTHERS_LABEL.to_string(),
            palette: None,
            secondary_axis: None,
            keep_temp_files_on_failure: true,
            retain_png_html: true,
            temp_dir: None,
            echarts_src: DEFAULT_ECHARTS_SRC.to_string(),
            image_width_px: DEFAULT_IMAGE_WIDTH_PX,
        }
    }
}

/// One named value series aligned with the category list.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Prepared values handed to the engine next to the `RenderOptions`.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesData {
    /// Bar/line: shared categories, one series per value column.
    Categorical {
        categories: Vec<String>,
        series: Vec<NamedSeries>,
    },
    /// Pie: labelled slices after bucketing.
    Proportion { slices: Vec<CategoryBucket> },
}

impl SeriesData {
    pub fn categorical(agg: &AggregatedSeries) -> Self {
        let series = agg
            .value_columns
            .iter()
            .enumerate()
            .map(|(i, name)| NamedSeries {
                name: name.clone(),
                values: agg.rows.iter().map(|r| r.values[i]).collect(),
            })
            .collect();
        SeriesData::Categorical {
            categories: agg.categories(),
            series,
        }
    }
}
