// zilkara-core/src/bin/update_assets.rs
// Fetch the top of the market, score every asset, write data/assets.json
// and push the same snapshot to the cache when one is configured.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::{info, warn};
use zilkara_core::config::Settings;
use zilkara_core::logging;
use zilkara_core::service::SnapshotPipeline;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init();

    let settings = Settings::new().context("loading settings")?;
    info!(
        "Scanning top {} assets in {} -> {}",
        settings.source.universe_size,
        settings.source.quote_currency,
        settings.output.path.display()
    );
    if !settings.cache_enabled() {
        info!("No cache URL configured, writing file only");
    }

    let pipeline = SnapshotPipeline::from_settings(&settings)?;
    let report = pipeline.run().await.context("writing snapshot")?;

    if let Some(reason) = &report.fetch_error {
        warn!("Fetch failed ({}), wrote an empty snapshot", reason);
    }
    info!(
        "assets.json updated: {} assets, {} sink(s)",
        report.snapshot.count,
        report.sinks_written.len()
    );

    Ok(())
}
