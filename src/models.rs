//! Declarative chart description: kind, axes, display toggles and sizing.

use crate::dataset::{ColumnKind, Dataset};
use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chart families supported by the renderer.
///
/// Serialized as `"bar"`, `"line"`, `"pie"`; the descriptive aliases
/// `"category"` and `"proportion"` are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[serde(alias = "category")]
    Bar,
    Line,
    #[serde(alias = "proportion")]
    Pie,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
        })
    }
}

/// Axis-pointer style used by the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Cross,
    Line,
    Shadow,
}

/// Pixel size of the chart canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSize {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Declarative description of one chart.
///
/// Every optional field carries an explicit default, so a config parsed from
/// `{"id": .., "type": .., "title": .., "xAxis": [..], "yAxis": [..]}` is complete.
/// Snake-case keys from older producers (`x_axis`, `show_legend`, ...) are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    /// Category (grouping) columns, in key order.
    #[serde(default, alias = "x_axis")]
    pub x_axis: Vec<String>,
    /// Value (summed) columns.
    #[serde(default, alias = "y_axis")]
    pub y_axis: Vec<String>,
    /// Optional name drawn next to the category axis.
    #[serde(default, alias = "x_label")]
    pub x_label: Option<String>,
    /// Optional name drawn next to the value axis.
    #[serde(default, alias = "y_label")]
    pub y_label: Option<String>,
    #[serde(default = "yes", alias = "show_title")]
    pub show_title: bool,
    #[serde(default = "yes", alias = "show_legend")]
    pub show_legend: bool,
    #[serde(default, alias = "show_grid")]
    pub show_grid: bool,
    #[serde(default, alias = "show_tooltip")]
    pub show_tooltip: bool,
    #[serde(default = "yes", alias = "show_x_axis")]
    pub show_x_axis: bool,
    #[serde(default = "yes", alias = "show_y_axis")]
    pub show_y_axis: bool,
    #[serde(default, alias = "show_x_label")]
    pub show_x_label: bool,
    #[serde(default, alias = "show_y_label")]
    pub show_y_label: bool,
    #[serde(default)]
    pub size: ChartSize,
    #[serde(default = "default_font_size", alias = "y_axis_font_size")]
    pub y_axis_font_size: u32,
    #[serde(default = "default_margin", alias = "y_axis_margin")]
    pub y_axis_margin: u32,
    #[serde(
        default = "yes",
        alias = "format_large_numbers",
        alias = "y_axis_format_large_numbers"
    )]
    pub format_large_numbers: bool,
    #[serde(default, alias = "tooltip_type", alias = "tooltipType")]
    pub tooltip_pointer: PointerKind,
    /// Initial visible window of the zoom slider, in percent.
    #[serde(default = "default_zoom_range", alias = "datazoom_range")]
    pub datazoom_range: (f64, f64),
}

fn yes() -> bool {
    true
}
fn default_width() -> u32 {
    600
}
fn default_height() -> u32 {
    300
}
fn default_font_size() -> u32 {
    10
}
fn default_margin() -> u32 {
    8
}
fn default_zoom_range() -> (f64, f64) {
    (10.0, 70.0)
}

impl ChartConfig {
    /// Build a config with the default display preset (legend on, grid off, labels off).
    pub fn new(
        id: impl Into<String>,
        kind: ChartKind,
        title: impl Into<String>,
        x_axis: &[&str],
        y_axis: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            x_axis: x_axis.iter().map(|s| s.to_string()).collect(),
            y_axis: y_axis.iter().map(|s| s.to_string()).collect(),
            x_label: None,
            y_label: None,
            show_title: true,
            show_legend: true,
            show_grid: false,
            show_tooltip: false,
            show_x_axis: true,
            show_y_axis: true,
            show_x_label: false,
            show_y_label: false,
            size: ChartSize::default(),
            y_axis_font_size: default_font_size(),
            y_axis_margin: default_margin(),
            format_large_numbers: true,
            tooltip_pointer: PointerKind::default(),
            datazoom_range: default_zoom_range(),
        }
    }

    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ChartError> {
        serde_json::from_str(text).map_err(|e| ChartError::config(format!("invalid chart config: {e}")))
    }

    /// Fill empty axes from the dataset's column types.
    ///
    /// - empty `x_axis`: datetime columns if any, else every non-numeric column
    /// - empty `y_axis`: every numeric column
    pub fn infer_default_axes(&mut self, data: &Dataset) {
        if self.x_axis.is_empty() {
            let temporal = data.columns_of_kind(|k| k == ColumnKind::Temporal);
            self.x_axis = if temporal.is_empty() {
                data.columns_of_kind(|k| k != ColumnKind::Numeric)
            } else {
                temporal
            };
        }
        if self.y_axis.is_empty() {
            self.y_axis = data.columns_of_kind(|k| k == ColumnKind::Numeric);
        }
    }

    /// Check the structural invariants of the description.
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.x_axis.is_empty() {
            return Err(ChartError::config("xAxis must name at least one column"));
        }
        if self.y_axis.is_empty() {
            return Err(ChartError::config("yAxis must name at least one column"));
        }
        if self.kind == ChartKind::Pie && self.y_axis.len() != 1 {
            return Err(ChartError::config(format!(
                "pie chart requires exactly one yAxis column, got {}",
                self.y_axis.len()
            )));
        }
        if self.size.width == 0 || self.size.height == 0 {
            return Err(ChartError::config("chart size must be non-zero"));
        }
        let (start, end) = self.datazoom_range;
        if !(0.0..=100.0).contains(&start) || !(0.0..=100.0).contains(&end) || start >= end {
            return Err(ChartError::config(format!(
                "datazoomRange must satisfy 0 <= start < end <= 100, got ({start}, {end})"
            )));
        }
        Ok(())
    }
}
