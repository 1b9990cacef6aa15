// Main entry point - CLI parsing, dependency wiring, exit status
mod application;
mod domain;
mod infrastructure;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::{ChartService, PipelineError};
use crate::application::export_service::ExportService;
use crate::domain::record::CoercionPolicy;
use crate::domain::window::WindowPolicy;
use crate::infrastructure::config::load_render_settings;
use crate::infrastructure::csv_source::CsvSource;
use crate::infrastructure::html_page::ChartJsPage;
use crate::infrastructure::quickchart_client::QuickChartClient;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a stacked run-times chart from a metrics CSV",
    long_about = None
)]
struct Cli {
    /// CSV file: first column timestamp, remaining columns named metrics
    #[arg(long, default_value = "metrics/metrics.csv")]
    csv: PathBuf,

    /// Exact number of trailing runs to chart (0 = derive from days/interval)
    #[arg(long, default_value_t = 0)]
    points: usize,

    /// Day window used when --points is 0
    #[arg(long, default_value_t = 7)]
    days: u32,

    /// Expected sampling interval between runs, in minutes
    #[arg(long, default_value_t = 5)]
    interval: u32,

    /// Output path for the rendered chart image
    #[arg(long, default_value = "metrics/stacked-times-quickchart.png")]
    out_png: PathBuf,

    /// Output path for the interactive HTML page
    #[arg(long, default_value = "metrics/stacked-times-quickchart.html")]
    out_html: PathBuf,

    /// Base URL of the QuickChart-compatible render service
    /// (overrides config/quickchart.toml)
    #[arg(long)]
    quickchart_url: Option<String>,

    /// Upper bound on charted points when deriving from days/interval
    #[arg(long, default_value_t = 800)]
    max_points: usize,

    /// What to do with numeric cells that fail to parse
    #[arg(long, value_enum, default_value = "zero")]
    on_bad_value: CoercionPolicy,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = load_render_settings()?;
    if let Some(url) = &cli.quickchart_url {
        settings.base_url = url.clone();
    }

    // Load and shape the data; all failures up to here are fatal
    let source = CsvSource::new(cli.csv.clone());
    let table = source.load()?.ok_or_else(|| PipelineError::CsvUnreadable {
        path: source.path().display().to_string(),
    })?;

    let window = WindowPolicy {
        points: cli.points,
        days: cli.days,
        interval_minutes: cli.interval,
        max_points: cli.max_points,
    };
    let chart_service = ChartService::new(window, cli.on_bad_value);
    let document = chart_service.build_document(&table)?;

    // Sink failures past this point are logged but never fatal
    let image_renderer = Arc::new(QuickChartClient::new(&settings)?);
    let page_renderer = Arc::new(ChartJsPage::new(settings.width, settings.height));
    let export_service = ExportService::new(image_renderer, page_renderer);

    let outcome = export_service.export(&document, &cli.out_png, &cli.out_html).await;
    if !outcome.image_written || !outcome.html_written {
        tracing::warn!(
            "partial export: image={} html={}",
            outcome.image_written,
            outcome.html_written
        );
    }

    Ok(())
}
