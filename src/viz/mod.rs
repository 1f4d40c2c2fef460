//! Chart rendering: embeddable ECharts HTML, base64 PNG and PNG files.
//!
//! - Group-and-sum of the configured columns, with "Others" bucketing for pies
//! - K/M/B abbreviated axis labels, tooltips and bar labels
//! - Interactive toolbox and zoom for HTML, fixed-size static layout for images
//! - Rasterization through a pluggable `Snapshotter` (headless Chromium by default)

pub mod bar;
pub mod engine;
pub mod format;
pub mod line;
pub mod options;
pub mod pie;
pub mod snapshot;
pub mod text;
pub mod types;
pub mod util;

pub use format::{NumberFormat, format_magnitude};
pub use options::{AssemblyFlags, RenderOptions, assemble, base_options};
pub use snapshot::{HeadlessBrowser, Snapshotter, Viewport};
pub use types::{NamedSeries, RenderSettings, SecondaryAxis, SeriesData};

use crate::aggregate::aggregate;
use crate::bucket::bucket_others;
use crate::dataset::Dataset;
use crate::error::{ChartError, Operation};
use crate::models::{ChartConfig, ChartKind};
use base64::{Engine as _, engine::general_purpose};
use options::CanvasWidth;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Renders one chart description over one dataset.
///
/// Every call recomputes the data and options from scratch; the renderer
/// itself holds no render state.
pub struct ChartRenderer<'a> {
    config: ChartConfig,
    data: &'a Dataset,
    settings: RenderSettings,
    snapshotter: Box<dyn Snapshotter + 'a>,
}

impl<'a> ChartRenderer<'a> {
    pub fn new(config: ChartConfig, data: &'a Dataset) -> Self {
        Self {
            config,
            data,
            settings: RenderSettings::default(),
            snapshotter: Box::new(HeadlessBrowser::default()),
        }
    }

    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_snapshotter<S: Snapshotter + 'a>(mut self, snapshotter: S) -> Self {
        self.snapshotter = Box::new(snapshotter);
        self
    }

    pub fn kind(&self) -> ChartKind {
        self.config.kind
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Resolved config: default axes filled in, then validated.
    fn resolved_config(&self) -> Result<ChartConfig, ChartError> {
        let mut config = self.config.clone();
        config.infer_default_axes(self.data);
        config.validate()?;
        Ok(config)
    }

    fn prepare(&self) -> Result<(ChartConfig, SeriesData), ChartError> {
        let config = self.resolved_config()?;
        let agg = aggregate(self.data, &config.x_axis, &config.y_axis)?;
        let series = match config.kind {
            ChartKind::Bar | ChartKind::Line => SeriesData::categorical(&agg),
            ChartKind::Pie => SeriesData::Proportion {
                slices: bucket_others(&agg, self.settings.threshold, &self.settings.others_label)?,
            },
        };
        log::debug!(
            "prepared {} groups for {} chart '{}'",
            agg.len(),
            config.kind,
            config.id
        );
        Ok((config, series))
    }

    /// Aggregated (and, for pies, bucketed) values this chart would draw.
    pub fn series(&self) -> Result<SeriesData, ChartError> {
        self.prepare().map(|(_, series)| series)
    }

    /// Assembled presentation options for the given mode.
    pub fn options(&self, flags: &AssemblyFlags) -> Result<RenderOptions, ChartError> {
        let config = self.resolved_config()?;
        assemble(&config, &self.settings, flags)
    }

    fn wrap<T>(
        &self,
        operation: Operation,
        f: impl FnOnce() -> Result<T, ChartError>,
    ) -> Result<T, ChartError> {
        f().map_err(|source| ChartError::Failed {
            operation,
            kind: self.config.kind,
            source: Box::new(source),
        })
    }

    /// Self-contained embeddable fragment with a fresh element id.
    pub fn render_html(&self) -> Result<String, ChartError> {
        self.wrap(Operation::RenderHtml, || {
            let (config, series) = self.prepare()?;
            let options = assemble(&config, &self.settings, &AssemblyFlags::interactive())?;
            engine::html_fragment(
                &element_id(&config.id),
                &options,
                &series,
                &self.settings.echarts_src,
            )
        })
    }

    /// Rasterize to PNG and return the bytes base64-encoded (standard alphabet).
    pub fn render_base64(&self) -> Result<String, ChartError> {
        self.wrap(Operation::RenderBase64, || {
            let dir = self
                .settings
                .temp_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir);
            ensure_dir(&dir)?;
            let stem = format!("_tmp_chart_{}", Uuid::new_v4().simple());
            let html = dir.join(format!("{stem}.html"));
            let png = dir.join(format!("{stem}.png"));

            let bytes = self.rasterize(&html, &png).and_then(|()| {
                fs::read(&png).map_err(|e| ChartError::io(format!("failed to read {}", png.display()), e))
            });
            match bytes {
                Ok(bytes) => {
                    remove_quietly(&html);
                    remove_quietly(&png);
                    Ok(general_purpose::STANDARD.encode(bytes))
                }
                Err(e) => {
                    if !self.settings.keep_temp_files_on_failure {
                        remove_quietly(&html);
                        remove_quietly(&png);
                    }
                    Err(e)
                }
            }
        })
    }

    /// Rasterize to `<output_dir>/<file_name>` (working directory when `None`).
    ///
    /// The page is written next to the image with an `.html` extension and
    /// kept unless `retain_png_html` is off.
    pub fn render_png(
        &self,
        output_dir: Option<&Path>,
        file_name: &str,
    ) -> Result<PathBuf, ChartError> {
        self.wrap(Operation::RenderPng, || {
            if file_name.is_empty() {
                return Err(ChartError::config("image file name must not be empty"));
            }
            let dir = match output_dir {
                Some(dir) => dir.to_path_buf(),
                None => std::env::current_dir()
                    .map_err(|e| ChartError::io("cannot resolve working directory", e))?,
            };
            ensure_dir(&dir)?;
            let image = dir.join(file_name);
            let html = image.with_extension("html");

            if let Err(e) = self.rasterize(&html, &image) {
                if !self.settings.keep_temp_files_on_failure {
                    remove_quietly(&html);
                }
                return Err(e);
            }
            if !self.settings.retain_png_html {
                remove_quietly(&html);
            }
            log::info!("wrote {}", image.display());
            Ok(image)
        })
    }

    /// Write the image-mode page to `html` and snapshot it into `png`.
    fn rasterize(&self, html: &Path, png: &Path) -> Result<(), ChartError> {
        let (config, series) = self.prepare()?;
        let flags = AssemblyFlags::image(self.settings.image_width_px);
        let options = assemble(&config, &self.settings, &flags)?;
        let page = engine::html_document(
            &element_id(&config.id),
            &options,
            &series,
            &self.settings.echarts_src,
        )?;
        fs::write(html, page)
            .map_err(|e| ChartError::io(format!("failed to write {}", html.display()), e))?;
        log::debug!("wrote snapshot page {}", html.display());

        let viewport = Viewport {
            width: match options.canvas.width {
                CanvasWidth::Pixels(px) => px,
                CanvasWidth::Percent(_) => self.settings.image_width_px,
            },
            height: options.canvas.height,
        };
        self.snapshotter.snapshot(html, png, viewport)
    }
}

/// DOM id: sanitized chart id plus a random suffix so several charts can share a page.
fn element_id(chart_id: &str) -> String {
    format!("chart_{}_{}", text::sanitize_id(chart_id), Uuid::new_v4().simple())
}

/// Create-if-absent; an existing directory is not an error.
fn ensure_dir(dir: &Path) -> Result<(), ChartError> {
    fs::create_dir_all(dir)
        .map_err(|e| ChartError::io(format!("failed to create {}", dir.display()), e))
}

fn remove_quietly(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => log::warn!("could not remove {}: {e}", path.display()),
    }
}
