//! Whole-dataset page of nested collapsible sections.

use super::{attribute_rows, escape_html, sample_rows, STYLE};
use crate::data::{CachedSession, Variable};

/// Render every group of the session's dataset as nested `<details>`.
pub fn render_dataset_page(session: &CachedSession) -> String {
    let dataset = &session.dataset;

    let dims: String = dataset
        .dims
        .iter()
        .map(|dim| format!("<li>{} ({})</li>", escape_html(&dim.name), dim.size))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta http-equiv="Content-Security-Policy" content="default-src 'none'; style-src 'unsafe-inline';">
    <style>{style}</style>
    <title>{title}</title>
</head>
<body>
    <h1>{title}</h1>
    <details open>
        <summary>Dimensions</summary>
        <ul>{dims}</ul>
    </details>
    <details open>
        <summary>Coordinates</summary>
{coords}
    </details>
    <details open>
        <summary>Data Variables</summary>
{data_vars}
    </details>
    <details>
        <summary>Global Attributes</summary>
        <table>
            <tr><th>Key</th><th>Value</th></tr>
            {global_attrs}
        </table>
    </details>
</body>
</html>
"#,
        style = STYLE,
        title = escape_html(&session.display_name()),
        dims = dims,
        coords = variable_sections(&dataset.coords),
        data_vars = variable_sections(&dataset.data_vars),
        global_attrs = attribute_rows(&dataset.attrs, "No attributes"),
    )
}

fn variable_sections(variables: &[Variable]) -> String {
    variables.iter().map(variable_section).collect()
}

fn variable_section(variable: &Variable) -> String {
    let samples = if variable.samples().is_empty() {
        "<p><em>No data available for this variable.</em></p>".to_string()
    } else {
        format!(
            "<table>\n                    <tr><th>Index</th><th>Value</th></tr>\n                    {}\n                </table>",
            sample_rows(variable)
        )
    };

    format!(
        r#"        <details>
            <summary>{name} <small>{dims} · {dtype}</small></summary>
            <details>
                <summary>Attributes</summary>
                <table>
                    <tr><th>Key</th><th>Value</th></tr>
                    {attrs}
                </table>
            </details>
            <details>
                <summary>Sample Data</summary>
                {samples}
            </details>
            <details>
                <summary>Encoding</summary>
                <table>
                    <tr><th>Key</th><th>Value</th></tr>
                    {encoding}
                </table>
            </details>
        </details>
"#,
        name = escape_html(&variable.name),
        dims = escape_html(&variable.dims_summary()),
        dtype = escape_html(variable.type_name()),
        attrs = attribute_rows(&variable.attrs, "No attributes"),
        samples = samples,
        encoding = attribute_rows(&variable.encoding, "No encoding"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::render::{render_variable_page, RenderOptions};
    use serde_json::json;
    use std::path::PathBuf;

    fn session() -> CachedSession {
        CachedSession::new(
            PathBuf::from("/data/<air>.nc"),
            Dataset::from_json(&json!({
                "dims": {"time": 2, "lat": 3},
                "coords": {"time": {"dims": ["time"], "shape": [2], "sample_data": ["2020-01-01", "2020-01-02"]}},
                "data_vars": {"air": {
                    "dims": ["time", "lat"],
                    "shape": [2, 3],
                    "attrs": {"units": "K", "note": "<hot & humid>"},
                    "encoding": {"zlib": true}
                }},
                "attrs": {"title": "Reanalysis"}
            })),
        )
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let html = render_dataset_page(&session());
        let positions: Vec<usize> = [
            "<summary>Dimensions</summary>",
            "<summary>Coordinates</summary>",
            "<summary>Data Variables</summary>",
            "<summary>Global Attributes</summary>",
        ]
        .iter()
        .map(|s| html.find(s).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("<li>time (2)</li><li>lat (3)</li>"));
        assert!(html.contains("<title>&lt;air&gt;.nc</title>"));
    }

    #[test]
    fn test_variable_subsections_without_chart() {
        let html = render_dataset_page(&session());
        assert!(html.contains("<summary>Encoding</summary>"));
        assert!(html.contains("<tr><td>zlib</td><td>true</td></tr>"));
        assert!(html.contains("<tr><td>0</td><td>2020-01-01</td></tr>"));
        assert!(html.contains("<tr><td>title</td><td>&quot;Reanalysis&quot;</td></tr>"));
        assert!(!html.contains("<canvas"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_attribute_rows_match_detail_page() {
        let session = session();
        let air = session.dataset.variable("air").unwrap();
        let rows = attribute_rows(&air.attrs, "No attributes");

        let whole = render_dataset_page(&session);
        let detail = render_variable_page(air, &RenderOptions::default());
        assert!(whole.contains(&rows));
        assert!(detail.contains(&rows));
        assert!(rows.contains("&quot;&lt;hot &amp; humid&gt;&quot;"));
    }
}
