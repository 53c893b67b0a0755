// ====
// CoinGecko Market Listing Source
// ====
// One GET /coins/markets per page of up to 250 coins, ordered by market cap,
// with the 24h/7d/30d change windows requested in the same call.
// ====

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};
use zilkara_common::data::RawAssetQuote;

use super::errors::SourceError;
use super::traits::{FetchOutcome, MarketDataSource};
use crate::config::SourceConfig;

/// Provider-side page size limit.
const MAX_PER_PAGE: usize = 250;
const CHANGE_WINDOWS: &str = "24h,7d,30d";
const API_KEY_HEADER: &str = "x-cg-demo-api-key";
const MAX_ERROR_BODY: usize = 200;

pub struct CoinGeckoSource {
    client: Client,
    config: SourceConfig,
}

impl CoinGeckoSource {
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            let value =
                HeaderValue::from_str(key).map_err(|e| SourceError::Client(e.to_string()))?;
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// `(per_page, pages)` needed to cover the configured universe.
    fn page_plan(&self) -> (usize, usize) {
        let size = self.config.universe_size.max(1);
        let per_page = size.min(MAX_PER_PAGE);
        (per_page, size.div_ceil(per_page))
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.config.base_url.trim_end_matches('/'))
    }

    async fn fetch_page(&self, page: usize, per_page: usize) -> Result<Vec<RawAssetQuote>, SourceError> {
        let params = [
            ("vs_currency", self.config.quote_currency.clone()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
            ("sparkline", "false".to_string()),
            ("price_change_percentage", CHANGE_WINDOWS.to_string()),
        ];

        debug!("GET {} page={} per_page={}", self.markets_url(), page, per_page);

        let response = self
            .client
            .get(self.markets_url())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            body.truncate(floor_char_boundary(&body, MAX_ERROR_BODY));
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_markets(&body)
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoSource {
    async fn fetch_top(&self) -> FetchOutcome {
        let (per_page, pages) = self.page_plan();
        let mut quotes = Vec::with_capacity(per_page);

        for page in 1..=pages {
            match self.fetch_page(page, per_page).await {
                Ok(batch) => {
                    let exhausted = batch.len() < per_page;
                    quotes.extend(batch);
                    if exhausted {
                        break;
                    }
                }
                Err(err) if page == 1 => {
                    warn!("Market fetch failed: {}", err);
                    return FetchOutcome::Failed(err);
                }
                Err(err) => {
                    warn!(
                        "Market page {} failed, keeping {} quotes: {}",
                        page,
                        quotes.len(),
                        err
                    );
                    break;
                }
            }
        }

        quotes.truncate(self.config.universe_size);
        info!(
            "Fetched {} quotes ({} universe, {})",
            quotes.len(),
            self.config.universe_size,
            self.config.quote_currency
        );
        FetchOutcome::Fetched(quotes)
    }
}

/// Parses a `/coins/markets` body. Rows that cannot be read at all are skipped.
pub fn parse_markets(body: &str) -> Result<Vec<RawAssetQuote>, SourceError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Array(rows) = value else {
        return Err(SourceError::Parse(
            "expected a JSON array of markets".to_string(),
        ));
    };

    let mut quotes = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<RawAssetQuote>(row) {
            Ok(quote) => quotes.push(quote),
            Err(e) => warn!("Skipping unreadable market row {}: {}", idx, e),
        }
    }
    Ok(quotes)
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
