//! HTML documents for a single variable and for a whole dataset.
//!
//! Every value interpolated into markup comes from the inspected file and
//! goes through [`escape_html`], including JSON-encoded and numeric fields.

mod dataset;
mod variable;

pub use dataset::render_dataset_page;
pub use variable::render_variable_page;

use crate::data::{ValueMap, Variable};
use crate::outline::{coerce_display, json_text};

/// Default location of the Chart.js bundle referenced by detail pages.
pub const DEFAULT_CHART_JS: &str = "chart.js";

/// Options shared by the renderers.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// `src` of the Chart.js script in variable pages.
    pub chart_js: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            chart_js: DEFAULT_CHART_JS.to_string(),
        }
    }
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Serialize JSON for a `<script>` body.
///
/// Characters that could close the element or break a JS parser are
/// written as unicode escapes, which JSON and JS both read back unchanged.
fn script_json(value: &serde_json::Value) -> String {
    let mut out = String::new();
    for c in value.to_string().chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

/// `<tr>` rows of key and JSON value, with a placeholder when empty.
///
/// Both documents use this, so attribute tables never diverge.
pub(crate) fn attribute_rows(map: &ValueMap, placeholder: &str) -> String {
    if map.is_empty() {
        return format!(
            "<tr><td colspan=\"2\"><em>{}</em></td></tr>",
            escape_html(placeholder)
        );
    }
    map.iter()
        .map(|(key, value)| {
            format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(key),
                escape_html(&json_text(value))
            )
        })
        .collect()
}

/// `<tr>` rows of index and sample value.
fn sample_rows(variable: &Variable) -> String {
    variable
        .samples()
        .iter()
        .enumerate()
        .map(|(i, value)| {
            format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                i,
                escape_html(&coerce_display(value))
            )
        })
        .collect()
}

const STYLE: &str = r#"
        body { font-family: sans-serif; padding: 16px; }
        table { border-collapse: collapse; width: 100%; margin-bottom: 16px; }
        th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }
        details { margin-left: 16px; }
        summary { cursor: pointer; font-weight: bold; }
"#;
