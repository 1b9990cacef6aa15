// Interactive HTML page renderer backed by CDN-hosted Chart.js
use crate::application::renderer::ChartPageRenderer;
use crate::domain::chart::ChartDocument;
use anyhow::{Context, Result};

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.0/dist/chart.umd.min.js";
const ZOOM_PLUGIN_CDN: &str =
    "https://cdn.jsdelivr.net/npm/chartjs-plugin-zoom@2.0.1/dist/chartjs-plugin-zoom.min.js";

/// Embeds the chart document as inline JSON in a fixed page template with
/// a zoom/pan plugin and a reset control. The page is self-contained
/// except for the two script includes.
#[derive(Debug, Clone)]
pub struct ChartJsPage {
    canvas_width: u32,
    canvas_height: u32,
}

impl ChartJsPage {
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
        }
    }
}

impl ChartPageRenderer for ChartJsPage {
    fn render_page(&self, document: &ChartDocument) -> Result<String> {
        let config_json =
            serde_json::to_string_pretty(document).context("serializing chart config")?;
        let title = document.title();

        Ok(format!(
            r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>{title}</title>
  <style>body{{font-family:Arial,Helvetica,sans-serif;padding:16px}}canvas{{max-width:100%;height:auto}}</style>
</head>
<body>
  <h2>{title}</h2>
  <div><button id="resetZoom">Reset zoom</button> <small>Drag to zoom / scroll to zoom / right-drag to pan</small></div>
  <canvas id="chart" width="{width}" height="{height}"></canvas>
  <script src="{chart_js}"></script>
  <script src="{zoom_plugin}"></script>
  <script>
    const cfg = {config_json};
    Chart.register(ChartZoom);
    const ctx = document.getElementById('chart').getContext('2d');
    const chart = new Chart(ctx, cfg);
    document.getElementById('resetZoom').addEventListener('click', () => chart.resetZoom());
  </script>
</body>
</html>"#,
            title = title,
            width = self.canvas_width,
            height = self.canvas_height,
            chart_js = CHART_JS_CDN,
            zoom_plugin = ZOOM_PLUGIN_CDN,
            config_json = config_json,
        ))
    }
}
