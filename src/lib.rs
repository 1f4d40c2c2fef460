//! chartprep
//!
//! Turn a tabular dataset plus a declarative chart description into an
//! ECharts chart: an embeddable HTML fragment, a base64 PNG, or a PNG file.
//! Pairs with the `chartprep` CLI.
//!
//! ### Features
//! - Group-by-and-sum over one or more category columns
//! - "Others" bucketing of small slices for pie charts
//! - K/M/B magnitude formatting, both host-side and in the rendered chart
//! - Bar, line and pie charts with interactive (toolbox, zoom) or static image layout
//! - Rasterization through a headless browser, behind a pluggable trait
//!
//! ### Example
//! ```no_run
//! use chartprep::{ChartConfig, ChartKind, ChartRenderer, Dataset};
//! use serde_json::json;
//!
//! let data = Dataset::from_json(&json!([
//!     {"region": "A", "sales": 10},
//!     {"region": "A", "sales": 5},
//!     {"region": "B", "sales": 1},
//! ]))?;
//! let config = ChartConfig::new("sales", ChartKind::Bar, "Sales", &["region"], &["sales"]);
//! let renderer = ChartRenderer::new(config, &data);
//! let html = renderer.render_html()?;
//! let png = renderer.render_png(Some("out".as_ref()), "sales.png")?;
//! println!("{} bytes of HTML, image at {}", html.len(), png.display());
//! # Ok::<(), chartprep::ChartError>(())
//! ```

pub mod aggregate;
pub mod bucket;
pub mod dataset;
pub mod error;
pub mod models;
pub mod storage;
pub mod viz;

pub use aggregate::{AggregatedRow, AggregatedSeries, aggregate};
pub use bucket::{CategoryBucket, bucket_others};
pub use dataset::{Cell, Dataset};
pub use error::{ChartError, Operation};
pub use models::{ChartConfig, ChartKind, ChartSize, PointerKind};
pub use viz::{ChartRenderer, HeadlessBrowser, RenderSettings, Snapshotter, format_magnitude};
