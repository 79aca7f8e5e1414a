use std::fs;
use std::path::Path;

use super::chart::Figure;
use crate::error::RenderError;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Serialize `figure` into a standalone page and write it to `path`,
/// creating parent directories as needed.
///
/// The figure is serialized before anything touches the file system.
pub fn write_html(figure: &Figure, title: &str, path: &Path) -> Result<(), RenderError> {
    let html = to_html(figure, title)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| RenderError::io(dir, e))?;
    }
    fs::write(path, html).map_err(|e| RenderError::io(path, e))
}

pub fn to_html(figure: &Figure, title: &str) -> Result<String, RenderError> {
    // `</` inside a string literal would end the <script> element early.
    let data = serde_json::to_string(&figure.data)?.replace("</", "<\\/");
    let layout = serde_json::to_string(&figure.layout)?.replace("</", "<\\/");
    let title = escape(title);

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="{PLOTLY_CDN}"></script>
    <style>
        html, body {{ margin: 0; height: 100%; }}
        #chart {{ width: 100%; height: 100%; }}
    </style>
</head>
<body>
    <div id="chart"></div>
    <script>
        Plotly.newPlot('chart', {data}, {layout}, {{responsive: true}});
    </script>
</body>
</html>
"#
    ))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
