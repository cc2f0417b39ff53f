//! Details pane formatting for outline nodes.

use crate::data::{CachedSession, DisplayNode, NodeKind, Variable};
use crate::outline::{coerce_display, json_text};
use crate::ui::ThemeColors;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

/// Format node details for display in the details pane.
pub fn format_node_details(
    node: &DisplayNode,
    session: Option<&CachedSession>,
    colors: &ThemeColors,
) -> Vec<Line<'static>> {
    if let Some(var) = &node.variable {
        return format_variable_details(var, colors);
    }

    let mut lines = vec![heading(node.label.clone(), colors), Line::from("")];

    if let Some(session) = session {
        let dataset = &session.dataset;
        let summary = match node.kind {
            NodeKind::Dimensions => Some(format!("{} dimensions", dataset.dims.len())),
            NodeKind::Coordinates => Some(format!("{} coordinates", dataset.coords.len())),
            NodeKind::DataVariables => Some(format!("{} data variables", dataset.data_vars.len())),
            _ => None,
        };
        if let Some(summary) = summary {
            lines.push(Line::from(Span::styled(summary, Style::default().fg(colors.text))));
        }
        lines.push(field("File: ", session.source_locator.display().to_string(), colors));
    }

    lines
}

/// Format variable node details.
fn format_variable_details(var: &Variable, colors: &ThemeColors) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading(var.name.clone(), colors),
        Line::from(Span::styled("─".repeat(50), Style::default().fg(colors.border))),
        Line::from(""),
        field("  Dimensions: ", var.dims_summary(), colors),
        field("  Data type: ", var.type_name().to_string(), colors),
    ];

    if let Some(shape) = &var.shape {
        let size = match element_count(shape) {
            Some(total) => format!("{} elements", total),
            None => "overflow".to_string(),
        };
        lines.push(field("  Size: ", size, colors));
    }

    lines.push(Line::from(""));
    lines.push(heading("Attributes".to_string(), colors));
    if var.attrs.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (none)",
            Style::default().fg(colors.text),
        )));
    }
    for (key, value) in &var.attrs {
        lines.push(field(&format!("  {}: ", key), json_text(value), colors));
    }

    let samples = var.samples();
    if !samples.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("Sample Data".to_string(), colors));
        let values: Vec<String> = samples.iter().map(coerce_display).collect();
        lines.push(Line::from(Span::styled(
            format!("  {}", values.join(", ")),
            Style::default().fg(colors.value),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: write HTML preview",
        Style::default().fg(colors.label),
    )));

    lines
}

/// Product of the extents, `None` if it does not fit in a `u64`.
fn element_count(shape: &[u64]) -> Option<u64> {
    shape.iter().try_fold(1u64, |acc, n| acc.checked_mul(*n))
}

fn heading(text: String, colors: &ThemeColors) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(colors.heading)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: String, colors: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(label.to_string(), Style::default().fg(colors.label)),
        Span::styled(value, Style::default().fg(colors.value)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Theme;
    use serde_json::json;

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| &*s.content).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn details(record: serde_json::Value) -> String {
        let colors = ThemeColors::from_theme(Theme::GruvboxDark);
        let var = Variable::from_json("t", &record);
        text(&format_variable_details(&var, &colors))
    }

    #[test]
    fn test_size_is_product_of_shape() {
        let out = details(json!({"dims": ["x", "y"], "shape": [3, 4]}));
        assert!(out.contains("  Size: 12 elements"));
    }

    #[test]
    fn test_huge_shape_reports_overflow() {
        let out = details(json!({"dims": ["x", "y"], "shape": [10_000_000_000u64, 10_000_000_000u64]}));
        assert!(out.contains("  Size: overflow"));
    }

    #[test]
    fn test_element_count() {
        assert_eq!(element_count(&[]), Some(1));
        assert_eq!(element_count(&[2, 0, 5]), Some(0));
        assert_eq!(element_count(&[u64::MAX, 2]), None);
    }

    #[test]
    fn test_attributes_use_json_text() {
        let out = details(json!({"attrs": {"scale_factor": 1.0, "units": "K"}}));
        assert!(out.contains("  scale_factor: 1"));
        assert!(out.contains(r#"  units: "K""#));
    }
}
