//! Single-variable detail page with a sample chart.

use super::{attribute_rows, escape_html, sample_rows, script_json, RenderOptions, STYLE};
use crate::data::Variable;
use serde_json::Value;

const NONCE: &str = "ekman-chart";

/// Render the detail page for one variable.
pub fn render_variable_page(variable: &Variable, options: &RenderOptions) -> String {
    let name = if variable.name.is_empty() {
        "?"
    } else {
        variable.name.as_str()
    };
    let samples = variable.samples();

    let sample_section = if samples.is_empty() {
        "<p><em>No data available for this variable.</em></p>".to_string()
    } else {
        format!(
            r#"<table>
        <tr><th>Index</th><th>Value</th></tr>
        {rows}
    </table>
    <canvas id="chart" width="400" height="200"></canvas>
    <script nonce="{nonce}" src="{chart_js}"></script>
    <script nonce="{nonce}">
        const ctx = document.getElementById('chart').getContext('2d');
        new Chart(ctx, {{
            type: 'line',
            data: {{
                labels: {labels},
                datasets: [{{
                    label: {label},
                    data: {data},
                    fill: false,
                    tension: 0.1
                }}]
            }},
            options: {{ responsive: true }}
        }});
    </script>"#,
            rows = sample_rows(variable),
            nonce = NONCE,
            chart_js = escape_html(&options.chart_js),
            labels = script_json(&Value::from((0..samples.len()).collect::<Vec<_>>())),
            label = script_json(&Value::from(name)),
            data = script_json(&Value::Array(samples.to_vec())),
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta http-equiv="Content-Security-Policy"
        content="default-src 'none'; img-src https:; script-src 'nonce-{nonce}'; style-src 'unsafe-inline';">
    <style>{style}</style>
    <title>Preview: {title}</title>
</head>
<body>
    <h1>{title}</h1>
    <p><strong>Dimensions:</strong> {dims}</p>
    <p><strong>Type:</strong> {dtype}</p>

    <h2>Attributes</h2>
    <table>
        <tr><th>Key</th><th>Value</th></tr>
        {attrs}
    </table>

    <h2>Sample Data (first {count} values)</h2>
    {samples}
</body>
</html>
"#,
        nonce = NONCE,
        style = STYLE,
        title = escape_html(name),
        dims = escape_html(&variable.dims_summary()),
        dtype = escape_html(variable.type_name()),
        attrs = attribute_rows(&variable.attrs, "No attributes"),
        count = samples.len(),
        samples = sample_section,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn variable(value: serde_json::Value) -> Variable {
        Variable::from_json("air", &value)
    }

    #[test]
    fn test_page_has_summary_and_attributes() {
        let var = variable(json!({
            "dims": ["time", "lat"],
            "shape": [4, 2],
            "dtype": "float32",
            "attrs": {"units": "K"}
        }));
        let html = render_variable_page(&var, &RenderOptions::default());

        assert!(html.contains("<h1>air</h1>"));
        assert!(html.contains("time (4) × lat (2)"));
        assert!(html.contains("<strong>Type:</strong> float32"));
        assert!(html.contains("<tr><td>units</td><td>&quot;K&quot;</td></tr>"));
    }

    #[test]
    fn test_no_samples_means_no_chart() {
        let html = render_variable_page(&variable(json!({})), &RenderOptions::default());
        assert!(html.contains("No data available for this variable."));
        assert!(html.contains("<em>No attributes</em>"));
        assert!(!html.contains("<canvas"));
        assert!(!html.contains("new Chart"));
    }

    #[test]
    fn test_chart_uses_first_ten_samples() {
        let samples: Vec<u32> = (0..12).collect();
        let html = render_variable_page(
            &variable(json!({"sample_data": samples})),
            &RenderOptions {
                chart_js: "media/chart.js".to_string(),
            },
        );

        assert!(html.contains("Sample Data (first 10 values)"));
        assert!(html.contains(r#"src="media/chart.js""#));
        assert!(html.contains("labels: [0,1,2,3,4,5,6,7,8,9]"));
        assert!(html.contains("data: [0,1,2,3,4,5,6,7,8,9]"));
        assert!(!html.contains("<td>10</td>"));
    }

    #[test]
    fn test_hostile_values_are_escaped() {
        let var = Variable::from_json(
            "<script>alert(1)</script>",
            &json!({
                "dtype": "<img src=x>",
                "dims": ["<b>"],
                "attrs": {"<k>": "</td><script>"},
                "sample_data": ["</script><script>alert(2)</script>"]
            }),
        );
        let html = render_variable_page(&var, &RenderOptions::default());

        assert!(!html.contains("<script>alert"));
        assert!(!html.contains("<img src=x>"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("</td><script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }
}
