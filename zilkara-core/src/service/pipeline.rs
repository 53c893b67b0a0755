// service/pipeline.rs
// Single linear pass: fetch -> build records -> wrap snapshot -> write every sink.

use std::sync::Arc;
use tracing::{info, warn};
use zilkara_common::data::{AssetRecordBuilder, Snapshot, VenueLink};

use super::errors::ServiceError;
use crate::config::Settings;
use crate::sink::{FileSink, RedisSink, SnapshotSink};
use crate::source::{CoinGeckoSource, MarketDataSource};

/// What one run produced.
#[derive(Debug)]
pub struct RunReport {
    pub snapshot: Snapshot,
    /// Set when the source failed and the snapshot is empty because of it.
    pub fetch_error: Option<String>,
    pub sinks_written: Vec<String>,
}

pub struct SnapshotPipeline {
    source: Arc<dyn MarketDataSource>,
    builder: AssetRecordBuilder,
    sinks: Vec<Box<dyn SnapshotSink>>,
}

impl SnapshotPipeline {
    pub fn new(source: Arc<dyn MarketDataSource>, builder: AssetRecordBuilder) -> Self {
        Self {
            source,
            builder,
            sinks: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn SnapshotSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Provider source, snapshot file, and the cache when a URL is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self, ServiceError> {
        let source = CoinGeckoSource::new(settings.source.clone())?;
        let link = VenueLink::new(&settings.link.base_url, settings.link.referral.clone())?;

        let mut pipeline = Self::new(Arc::new(source), AssetRecordBuilder::new(link))
            .with_sink(Box::new(FileSink::new(&settings.output.path)));

        if let Some(cache) = RedisSink::from_config(&settings.cache)? {
            pipeline = pipeline.with_sink(Box::new(cache));
        }

        Ok(pipeline)
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Fetches and scores without writing anything.
    pub async fn collect(&self) -> (Snapshot, Option<String>) {
        let outcome = self.source.fetch_top().await;
        let fetch_error = outcome.error().map(|e| e.to_string());
        if let Some(reason) = &fetch_error {
            warn!("No market data this run: {}", reason);
        }

        let quotes = outcome.into_quotes();
        let snapshot = Snapshot::stamped(self.builder.build_all(&quotes));
        info!(
            "Built {} asset records from {} quotes",
            snapshot.count,
            quotes.len()
        );

        (snapshot, fetch_error)
    }

    /// Runs once. Fetch problems degrade to an empty snapshot; any write
    /// failure aborts the run.
    pub async fn run(&self) -> Result<RunReport, ServiceError> {
        let (snapshot, fetch_error) = self.collect().await;

        let mut sinks_written = Vec::with_capacity(self.sinks.len());
        for sink in &self.sinks {
            sink.persist(&snapshot).await?;
            info!("Snapshot ({} assets) written to {}", snapshot.count, sink.describe());
            sinks_written.push(sink.describe());
        }

        Ok(RunReport {
            snapshot,
            fetch_error,
            sinks_written,
        })
    }
}
