//! Utility functions for visualization: default palettes and palette validation.

use crate::error::ChartError;
use crate::models::ChartKind;
use regex::Regex;
use std::sync::OnceLock;

/// Green-led palette for category (bar) and line charts.
const SERIES5: [&str; 5] = ["#009953", "#00F284", "#F2B950", "#F28444", "#F2D8CE"];

/// Warm palette for pie slices; more entries since slices outnumber series.
const AMBER10: [&str; 10] = [
    "#BF9924", "#F2CC0F", "#F2A30F", "#D97D0D", "#733F12", "#7F6A51", "#FFB156", "#FFD4A2",
    "#7F582B", "#CCAA82",
];

/// Default ordered palette for a chart kind.
pub fn default_palette(kind: ChartKind) -> Vec<String> {
    let colors: &[&str] = match kind {
        ChartKind::Bar | ChartKind::Line => &SERIES5,
        ChartKind::Pie => &AMBER10,
    };
    colors.iter().map(|c| c.to_string()).collect()
}

fn hex_color() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static regex"))
}

/// Check a caller-supplied palette: non-empty, every entry `#RRGGBB`.
pub fn validate_palette(colors: &[String]) -> Result<(), ChartError> {
    if colors.is_empty() {
        return Err(ChartError::config("palette must contain at least one color"));
    }
    if let Some(bad) = colors.iter().find(|c| !hex_color().is_match(c)) {
        return Err(ChartError::config(format!(
            "palette color '{bad}' is not a #RRGGBB hex value"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_its_own_palette() {
        assert_eq!(default_palette(ChartKind::Bar)[0], "#009953");
        assert_eq!(default_palette(ChartKind::Pie).len(), 10);
    }

    #[test]
    fn palette_validation() {
        assert!(validate_palette(&["#00ff00".into(), "#ABCDEF".into()]).is_ok());
        assert!(validate_palette(&["green".into()]).is_err());
        assert!(validate_palette(&[]).is_err());
    }
}
