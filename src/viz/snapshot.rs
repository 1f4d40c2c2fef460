//! Headless-browser rasterization of a generated HTML page.
//!
//! The renderer only depends on the `Snapshotter` trait; `HeadlessBrowser`
//! drives a Chromium-compatible binary and any
//! `Fn(&Path, &Path, Viewport) -> Result<(), ChartError>` works as a stand-in.

use crate::error::ChartError;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Characters escaped in the path part of a `file://` URL.
const PATH_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Browser window size for the screenshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Turns an HTML file into a PNG file.
pub trait Snapshotter {
    fn snapshot(&self, html: &Path, png: &Path, viewport: Viewport) -> Result<(), ChartError>;
}

impl<F> Snapshotter for F
where
    F: Fn(&Path, &Path, Viewport) -> Result<(), ChartError>,
{
    fn snapshot(&self, html: &Path, png: &Path, viewport: Viewport) -> Result<(), ChartError> {
        self(html, png, viewport)
    }
}

/// Chromium (or Chrome / Edge) in `--headless --screenshot` mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessBrowser {
    pub program: PathBuf,
    /// The browser process is killed once this elapses.
    pub timeout: Duration,
    pub extra_args: Vec<String>,
}

impl Default for HeadlessBrowser {
    fn default() -> Self {
        Self {
            program: PathBuf::from("chromium"),
            timeout: Duration::from_secs(60),
            extra_args: Vec::new(),
        }
    }
}

impl HeadlessBrowser {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    fn command(&self, url: &str, png: &Path, viewport: Viewport) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--headless")
            .arg("--disable-gpu")
            .arg("--hide-scrollbars")
            .arg(format!("--screenshot={}", png.display()))
            .arg(format!("--window-size={},{}", viewport.width, viewport.height))
            .args(&self.extra_args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

/// `file://` URL for an absolute path.
pub fn file_url(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let encoded = utf8_percent_encode(&raw, PATH_SET).to_string();
    if encoded.starts_with('/') {
        format!("file://{encoded}")
    } else {
        format!("file:///{encoded}")
    }
}

impl Snapshotter for HeadlessBrowser {
    fn snapshot(&self, html: &Path, png: &Path, viewport: Viewport) -> Result<(), ChartError> {
        let html = std::fs::canonicalize(html)
            .map_err(|e| ChartError::io(format!("cannot resolve {}", html.display()), e))?;
        let png = if png.is_absolute() {
            png.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| ChartError::io("cannot resolve working directory", e))?
                .join(png)
        };
        let url = file_url(&html);
        log::debug!(
            "spawning {} for {} at {}x{}",
            self.program.display(),
            url,
            viewport.width,
            viewport.height
        );

        let mut child = self.command(&url, &png, viewport).spawn().map_err(|e| {
            ChartError::io(format!("failed to launch {}", self.program.display()), e)
        })?;

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if started.elapsed() >= self.timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ChartError::render(format!(
                        "{} timed out after {}s",
                        self.program.display(),
                        self.timeout.as_secs_f64()
                    )));
                }
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    return Err(ChartError::io("failed to wait for browser", e));
                }
            }
        };

        if !status.success() {
            return Err(ChartError::render(format!(
                "{} exited with {status}",
                self.program.display()
            )));
        }
        if !png.is_file() {
            return Err(ChartError::render(format!(
                "browser exited without writing {}",
                png.display()
            )));
        }
        Ok(())
    }
}
