//! Error type shared by every stage of the chart pipeline.

use crate::models::ChartKind;
use std::fmt;
use thiserror::Error;

/// Public render operations, used to label wrapped failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RenderHtml,
    RenderBase64,
    RenderPng,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::RenderHtml => "render to HTML",
            Operation::RenderBase64 => "render to base64",
            Operation::RenderPng => "render to PNG",
        };
        f.write_str(name)
    }
}

/// Failure from any pipeline stage; public render calls wrap it in `Failed`.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Invalid chart description: bad axes, missing columns, bad settings.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Grouping or summation failed (e.g. text in a value column).
    #[error("aggregation error: {0}")]
    Aggregation(String),

    /// The rendering or snapshot collaborator failed.
    #[error("render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// User-facing wrapper returned by every public render operation.
    #[error("{kind} chart {operation} failed")]
    Failed {
        operation: Operation,
        kind: ChartKind,
        #[source]
        source: Box<ChartError>,
    },
}

impl ChartError {
    pub fn config(msg: impl Into<String>) -> Self {
        ChartError::Configuration(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        ChartError::Render {
            message: msg.into(),
            source: None,
        }
    }

    pub fn io(msg: impl Into<String>, source: std::io::Error) -> Self {
        ChartError::Render {
            message: msg.into(),
            source: Some(source),
        }
    }

    /// Innermost error beneath any `Failed` wrappers.
    pub fn root(&self) -> &ChartError {
        match self {
            ChartError::Failed { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self.root(), ChartError::Configuration(_))
    }

    pub fn is_aggregation(&self) -> bool {
        matches!(self.root(), ChartError::Aggregation(_))
    }

    pub fn is_render(&self) -> bool {
        matches!(self.root(), ChartError::Render { .. })
    }
}
