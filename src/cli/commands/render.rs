use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use common::ViewMode;
use tracing::{info, instrument};

use crate::source::{fetch_records, load_records};

/// Options of the `render` command
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub input: Option<PathBuf>,
    pub backend_url: Option<String>,
    pub view: ViewMode,
    pub width: f64,
    pub output: PathBuf,
}

/// Render the travel mode chart for `options.view` into an SVG file
#[instrument]
pub async fn render(options: RenderOptions) -> Result<()> {
    let records = match (&options.input, &options.backend_url) {
        (Some(path), _) => load_records(path).await?,
        (None, Some(url)) => fetch_records(url).await?,
        (None, None) => bail!("No data source: pass --input or --backend-url (or set BACKEND_URL)"),
    };

    if records.is_empty() {
        info!("No travel mode records, the chart will be blank");
    }

    let svg = chart::render_svg(&records, options.view, options.width)
        .context("Failed to lay out the travel mode chart")?;

    tokio::fs::write(&options.output, svg)
        .await
        .with_context(|| format!("Failed to write {}", options.output.display()))?;

    info!(
        "Rendered {} chart of {} records to {}",
        options.view,
        records.len(),
        options.output.display()
    );
    Ok(())
}
