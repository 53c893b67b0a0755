// zilkara-core/src/bin/push_to_redis.rs
// Push the snapshot file as-is to the cache key, then read it back.

use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use tracing::{info, warn};
use zilkara_core::config::Settings;
use zilkara_core::logging;
use zilkara_core::sink::{FileSink, RedisSink, SnapshotSink};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    logging::init();

    let settings = Settings::new().context("loading settings")?;
    let Some(cache) = RedisSink::from_config(&settings.cache)? else {
        bail!("no cache configured: set ZILKARA_CACHE__URL or REDIS_URL");
    };

    let file = FileSink::new(&settings.output.path);
    let snapshot = file
        .load()
        .await
        .with_context(|| format!("reading {}", file.path().display()))?;

    cache.persist(&snapshot).await.context("pushing snapshot")?;

    match cache.stored_count().await? {
        Some(count) if count == snapshot.count => {
            info!("Cache updated: {} assets under '{}'", count, cache.key())
        }
        Some(count) => warn!(
            "Cache '{}' holds {} assets, expected {}",
            cache.key(),
            count,
            snapshot.count
        ),
        None => warn!("Cache key '{}' missing right after write", cache.key()),
    }

    Ok(())
}
