// Export service - drives both chart sinks, tolerating per-sink failure
use crate::application::renderer::{ChartImageRenderer, ChartPageRenderer};
use crate::domain::chart::ChartDocument;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// What each sink managed to produce. A failed sink never aborts the
/// other one, and never raises the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOutcome {
    pub image_written: bool,
    pub html_written: bool,
}

pub struct ExportService {
    image_renderer: Arc<dyn ChartImageRenderer>,
    page_renderer: Arc<dyn ChartPageRenderer>,
}

impl ExportService {
    pub fn new(
        image_renderer: Arc<dyn ChartImageRenderer>,
        page_renderer: Arc<dyn ChartPageRenderer>,
    ) -> Self {
        Self {
            image_renderer,
            page_renderer,
        }
    }

    /// Render and write both artifacts, image first. The HTML page is
    /// attempted even when the image sink failed.
    pub async fn export(
        &self,
        document: &ChartDocument,
        image_path: &Path,
        html_path: &Path,
    ) -> ExportOutcome {
        let image_written = match self.export_image(document, image_path).await {
            Ok(()) => {
                tracing::info!("Wrote chart image: {}", image_path.display());
                true
            }
            Err(e) => {
                tracing::error!("Failed to fetch chart image: {:#}", e);
                false
            }
        };

        let html_written = match self.export_page(document, html_path).await {
            Ok(()) => {
                tracing::info!("Wrote interactive HTML: {}", html_path.display());
                true
            }
            Err(e) => {
                tracing::error!("Failed to write interactive HTML: {:#}", e);
                false
            }
        };

        ExportOutcome {
            image_written,
            html_written,
        }
    }

    async fn export_image(&self, document: &ChartDocument, path: &Path) -> Result<()> {
        let bytes = self.image_renderer.render_image(document).await?;
        write_artifact(path, &bytes).await
    }

    async fn export_page(&self, document: &ChartDocument, path: &Path) -> Result<()> {
        let page = self.page_renderer.render_page(document)?;
        write_artifact(path, page.as_bytes()).await
    }
}

/// Whole-buffer write with parent directory creation. No atomic rename;
/// each output path is owned by a single run.
async fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("writing {}", path.display()))
}
