//! K/M/B magnitude formatting, on the host and as client-side ECharts formatters.
//!
//! `MAGNITUDE_STEPS` is the single table both renditions are generated from, so
//! the labels drawn by the browser match the strings produced here.

use serde::{Deserialize, Serialize};

/// `(threshold, suffix)` pairs, largest first.
pub const MAGNITUDE_STEPS: [(f64, &str); 3] = [(1.0e9, "B"), (1.0e6, "M"), (1.0e3, "K")];

/// Abbreviate `value` with a K/M/B suffix at one decimal.
///
/// Comparisons are literal `>=`, so large negative numbers are not abbreviated.
pub fn format_magnitude(value: f64) -> String {
    for (threshold, suffix) in MAGNITUDE_STEPS {
        if value >= threshold {
            return format!("{:.1}{}", value / threshold, suffix);
        }
    }
    value.to_string()
}

/// JavaScript function source (`function(<args>) { <body> }` split in two).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFunction {
    pub args: &'static str,
    pub body: String,
}

impl ClientFunction {
    pub fn source(&self) -> String {
        format!("function({}) {{ {} }}", self.args, self.body)
    }
}

/// Where a client-side formatter is attached; each hook receives different arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatterHook {
    /// Axis tick labels: `function(value)`.
    AxisLabel,
    /// Per-bar value labels: `function(params)` with a scalar `params.value`.
    SeriesLabel,
    /// Axis-triggered tooltip: `function(params)` with an array of series params.
    AxisTooltip,
    /// Item-triggered tooltip (pie slices): `function(params)` for one item.
    ItemTooltip,
}

/// Named number-formatting strategy, mapped to engine syntax at assembly time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// Leave numbers to the engine's defaults.
    #[default]
    Plain,
    /// K/M/B abbreviation.
    Magnitude,
}

impl NumberFormat {
    pub fn from_flag(format_large_numbers: bool) -> Self {
        if format_large_numbers {
            NumberFormat::Magnitude
        } else {
            NumberFormat::Plain
        }
    }

    /// Host-side rendition.
    pub fn format(self, value: f64) -> String {
        match self {
            NumberFormat::Plain => value.to_string(),
            NumberFormat::Magnitude => format_magnitude(value),
        }
    }

    /// Client-side rendition for `hook`, or `None` when the engine default applies.
    pub fn client_function(self, hook: FormatterHook) -> Option<ClientFunction> {
        if self == NumberFormat::Plain {
            return None;
        }
        let f = match hook {
            FormatterHook::AxisLabel => ClientFunction {
                args: "value",
                body: format!("return {};", magnitude_expr("value")),
            },
            FormatterHook::SeriesLabel => ClientFunction {
                args: "params",
                body: format!(
                    "var value = params.value; return {};",
                    magnitude_expr("value")
                ),
            },
            FormatterHook::AxisTooltip => ClientFunction {
                args: "params",
                body: format!(
                    "var result = params[0].name + '<br/>'; \
                     params.forEach(function(param) {{ var value = param.value; \
                     result += param.marker + ' ' + param.seriesName + ': ' + ({}) + '<br/>'; }}); \
                     return result;",
                    magnitude_expr("value")
                ),
            },
            FormatterHook::ItemTooltip => ClientFunction {
                args: "params",
                body: format!(
                    "var value = params.value; \
                     return params.marker + ' ' + params.name + ': ' + ({}) + ' (' + params.percent + '%)';",
                    magnitude_expr("value")
                ),
            },
        };
        Some(f)
    }
}

/// Nested ternary over `MAGNITUDE_STEPS` mirroring `format_magnitude`.
fn magnitude_expr(var: &str) -> String {
    let mut expr = format!("String({var})");
    for (threshold, suffix) in MAGNITUDE_STEPS.iter().rev() {
        expr = format!("{var} >= {threshold} ? ({var} / {threshold}).toFixed(1) + '{suffix}' : {expr}");
    }
    expr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_expression_walks_thresholds_largest_first() {
        let expr = magnitude_expr("v");
        let b = expr.find("1000000000").unwrap();
        let m = expr.find("1000000 ").unwrap();
        let k = expr.find("1000 ").unwrap();
        assert!(b < m && m < k, "{expr}");
        assert!(expr.ends_with("String(v)"));
    }

    #[test]
    fn plain_has_no_client_function() {
        assert!(NumberFormat::Plain.client_function(FormatterHook::AxisLabel).is_none());
    }
}
