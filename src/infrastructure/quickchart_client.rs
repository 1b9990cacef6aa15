// QuickChart rendering client
use crate::application::renderer::ChartImageRenderer;
use crate::domain::chart::ChartDocument;
use crate::infrastructure::config::RenderSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use std::time::Duration;

/// HTTP adapter for a QuickChart-compatible rendering service: one POST
/// to {base_url}/chart, raw image bytes back, single attempt, no retry.
#[derive(Debug, Clone)]
pub struct QuickChartClient {
    base_url: String,
    width: u32,
    height: u32,
    format: String,
    client: reqwest::Client,
}

impl QuickChartClient {
    pub fn new(settings: &RenderSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            width: settings.width,
            height: settings.height,
            format: settings.format.clone(),
            client,
        })
    }

    fn chart_url(&self) -> String {
        format!("{}/chart", self.base_url)
    }
}

#[async_trait]
impl ChartImageRenderer for QuickChartClient {
    async fn render_image(&self, document: &ChartDocument) -> Result<Bytes> {
        let payload = json!({
            "chart": document,
            "width": self.width,
            "height": self.height,
            "format": self.format,
        });

        tracing::info!("Posting chart config to {}", self.chart_url());
        let response = self
            .client
            .post(self.chart_url())
            .json(&payload)
            .send()
            .await
            .context("Failed to send request to the render service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("render service returned status {}: {}", status, body);
        }

        response
            .bytes()
            .await
            .context("Failed to read render service response body")
    }
}
