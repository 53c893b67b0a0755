// source/traits.rs

use async_trait::async_trait;
use zilkara_common::data::RawAssetQuote;

use super::errors::SourceError;

/// Result of one fetch. A failure carries its reason but never aborts the run.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(Vec<RawAssetQuote>),
    Failed(SourceError),
}

impl FetchOutcome {
    pub fn quotes(&self) -> &[RawAssetQuote] {
        match self {
            FetchOutcome::Fetched(quotes) => quotes,
            FetchOutcome::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&SourceError> {
        match self {
            FetchOutcome::Fetched(_) => None,
            FetchOutcome::Failed(err) => Some(err),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    /// Empty on failure.
    pub fn into_quotes(self) -> Vec<RawAssetQuote> {
        match self {
            FetchOutcome::Fetched(quotes) => quotes,
            FetchOutcome::Failed(_) => Vec::new(),
        }
    }
}

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Top of the universe by market cap, with 24h/7d/30d changes, in provider order.
    async fn fetch_top(&self) -> FetchOutcome;
}
