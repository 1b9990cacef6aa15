// Chart document model - the declarative configuration both renderers consume
use serde::Serialize;

/// Fixed color palette, cycled by dataset index.
pub const PALETTE: [&str; 12] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf", "#aec7e8", "#ffbb78",
];

/// Stacking group shared by every bar dataset so segments sum visually.
pub const STACK_GROUP: &str = "stack1";

const BAR_BORDER_COLOR: &str = "#222";
const OVERLAY_BORDER_COLOR: &str = "#d62728";
const OVERLAY_FILL_COLOR: &str = "rgba(214,39,40,0.12)";

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One named series plus its rendering metadata, serialized with the
/// key spelling the charting library expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    pub border_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

impl Dataset {
    /// Stacked bar slice for one timing column.
    pub fn stacked_bar(label: String, data: Vec<f64>, color: &str) -> Self {
        Self {
            label,
            data,
            kind: None,
            background_color: Some(color.to_string()),
            border_color: Some(BAR_BORDER_COLOR.to_string()),
            stack: Some(STACK_GROUP.to_string()),
            border_width: 0.5,
            point_radius: None,
            fill: None,
        }
    }

    /// Non-stacked line overlaid on the bars, used for aggregate series.
    /// Carries no stack id so it never participates in the sum.
    pub fn overlay_line(label: String, data: Vec<f64>) -> Self {
        Self {
            label,
            data,
            kind: Some("line".to_string()),
            background_color: Some(OVERLAY_FILL_COLOR.to_string()),
            border_color: Some(OVERLAY_BORDER_COLOR.to_string()),
            stack: None,
            border_width: 2.5,
            point_radius: Some(2.0),
            fill: Some(false),
        }
    }

    pub fn is_line(&self) -> bool {
        self.kind.as_deref() == Some("line")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// The complete chart configuration. This is the sole artifact handed to
/// the image renderer and the HTML page renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDocument {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartDocument {
    /// Stacked-bar document with the fixed presentation options.
    pub fn stacked_bar(title: String, labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self {
            kind: "bar".to_string(),
            data: ChartData { labels, datasets },
            options: ChartOptions::stacked_times(title),
        }
    }

    pub fn title(&self) -> &str {
        &self.options.plugins.title.text
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: PluginOptions,
    pub scales: ScaleOptions,
    pub interaction: HoverOptions,
}

impl ChartOptions {
    /// Category x axis labeled by run timestamp, linear stacked y axis in
    /// milliseconds, legend at the bottom, nearest-point interaction.
    pub fn stacked_times(title: String) -> Self {
        Self {
            responsive: false,
            plugins: PluginOptions {
                title: TitleOptions {
                    display: true,
                    text: title,
                },
                legend: LegendOptions { position: "bottom" },
                tooltip: HoverOptions {
                    mode: "index",
                    intersect: false,
                },
            },
            scales: ScaleOptions {
                x: XAxisOptions {
                    stacked: true,
                    ticks: TickOptions {
                        max_rotation: 45,
                        auto_skip: true,
                        max_ticks_limit: 20,
                    },
                    title: TitleOptions {
                        display: true,
                        text: "Run timestamp (UTC)".to_string(),
                    },
                },
                y: YAxisOptions {
                    stacked: true,
                    begin_at_zero: true,
                    title: TitleOptions {
                        display: true,
                        text: "Elapsed time (ms)".to_string(),
                    },
                },
            },
            interaction: HoverOptions {
                mode: "nearest",
                intersect: false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginOptions {
    pub title: TitleOptions,
    pub legend: LegendOptions,
    pub tooltip: HoverOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendOptions {
    pub position: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverOptions {
    pub mode: &'static str,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleOptions {
    pub x: XAxisOptions,
    pub y: YAxisOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxisOptions {
    pub stacked: bool,
    pub ticks: TickOptions,
    pub title: TitleOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxisOptions {
    pub stacked: bool,
    pub begin_at_zero: bool,
    pub title: TitleOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickOptions {
    pub max_rotation: u32,
    pub auto_skip: bool,
    pub max_ticks_limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_dataset_serialization() {
        let ds = Dataset::stacked_bar("readTime".to_string(), vec![1.0, 2.5], "#1f77b4");
        let json = serde_json::to_value(&ds).unwrap();
        assert_eq!(json["label"], "readTime");
        assert_eq!(json["backgroundColor"], "#1f77b4");
        assert_eq!(json["borderColor"], "#222");
        assert_eq!(json["stack"], "stack1");
        assert_eq!(json["borderWidth"], 0.5);
        // Bar datasets carry no explicit type or line-only keys
        assert!(json.get("type").is_none());
        assert!(json.get("pointRadius").is_none());
        assert!(json.get("fill").is_none());
    }

    #[test]
    fn test_overlay_line_serialization() {
        let ds = Dataset::overlay_line("total".to_string(), vec![3.5]);
        let json = serde_json::to_value(&ds).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["borderColor"], "#d62728");
        assert_eq!(json["pointRadius"], 2.0);
        assert_eq!(json["fill"], false);
        // No stack id, so it never joins the bar sum
        assert!(json.get("stack").is_none());
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), PALETTE[0]);
        assert_eq!(palette_color(12), PALETTE[0]);
        assert_eq!(palette_color(13), PALETTE[1]);
    }

    #[test]
    fn test_document_options_shape() {
        let doc = ChartDocument::stacked_bar("title".to_string(), vec![], vec![]);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "bar");
        assert_eq!(json["options"]["responsive"], false);
        assert_eq!(json["options"]["plugins"]["legend"]["position"], "bottom");
        assert_eq!(json["options"]["plugins"]["tooltip"]["mode"], "index");
        assert_eq!(json["options"]["scales"]["x"]["stacked"], true);
        assert_eq!(json["options"]["scales"]["x"]["ticks"]["maxTicksLimit"], 20);
        assert_eq!(json["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(json["options"]["interaction"]["mode"], "nearest");
    }
}
