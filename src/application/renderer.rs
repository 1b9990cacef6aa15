// Renderer traits for the two chart sinks
use crate::domain::chart::ChartDocument;
use async_trait::async_trait;
use bytes::Bytes;

/// Remote image rendering: submit a chart document, get image bytes back.
#[async_trait]
pub trait ChartImageRenderer: Send + Sync {
    async fn render_image(&self, document: &ChartDocument) -> anyhow::Result<Bytes>;
}

/// Local page rendering: submit a chart document, get a self-contained
/// HTML page back.
pub trait ChartPageRenderer: Send + Sync {
    fn render_page(&self, document: &ChartDocument) -> anyhow::Result<String>;
}
