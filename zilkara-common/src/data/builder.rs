// zilkara-common/src/data/builder.rs
// Turns provider quotes into scored asset records.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

use super::types::{AssetRecord, DataError, DataResult, RawAssetQuote};
use crate::scoring::StabilityAssessment;

pub const DEFAULT_VENUE_BASE_URL: &str = "https://www.binance.com/en/trade";

const PRICE_DECIMALS: u32 = 4;
const CHANGE_DECIMALS: u32 = 2;
const PRICE_SIGNIFICANT_DIGITS: u32 = 4;
const LINK_QUOTE: &str = "USDT";

/// Deterministic trading-venue link for a symbol: `<base>/<SYMBOL>_USDT`.
#[derive(Debug, Clone)]
pub struct VenueLink {
    base: String,
    referral: Option<String>,
}

impl VenueLink {
    pub fn new(base_url: &str, referral: Option<String>) -> DataResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|_| DataError::InvalidLinkBase(base_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(DataError::InvalidLinkBase(base_url.to_string()));
        }

        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            referral: referral.filter(|code| !code.trim().is_empty()),
        })
    }

    /// Returns `None` for an empty symbol.
    pub fn for_symbol(&self, symbol: &str) -> Option<String> {
        if symbol.is_empty() {
            return None;
        }

        let mut url = Url::parse(&self.base).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(&format!("{}_{}", symbol, LINK_QUOTE));

        if let Some(code) = &self.referral {
            url.query_pairs_mut()
                .append_pair("type", "spot")
                .append_pair("ref", code);
        }
        Some(url.to_string())
    }
}

impl Default for VenueLink {
    fn default() -> Self {
        Self {
            base: DEFAULT_VENUE_BASE_URL.to_string(),
            referral: None,
        }
    }
}

/// Composes one [`AssetRecord`] per quote. Pure: no I/O, no shared state.
#[derive(Debug, Clone, Default)]
pub struct AssetRecordBuilder {
    link: VenueLink,
}

impl AssetRecordBuilder {
    pub fn new(link: VenueLink) -> Self {
        Self { link }
    }

    pub fn build(&self, quote: &RawAssetQuote) -> AssetRecord {
        let symbol = quote
            .symbol
            .as_deref()
            .map(|s| s.trim().to_uppercase())
            .unwrap_or_default();

        let chg_24h = quote.price_change_percentage_24h;
        let chg_7d = quote.price_change_percentage_7d_in_currency;
        let chg_30d = quote.price_change_percentage_30d_in_currency;
        let assessment = StabilityAssessment::from_changes(chg_24h, chg_7d, chg_30d);

        AssetRecord {
            link: self.link.for_symbol(&symbol),
            symbol,
            name: quote.name.clone().unwrap_or_default(),
            price: round_price(quote.current_price),
            chg_24h_pct: round_change(chg_24h),
            chg_7d_pct: round_change(chg_7d),
            chg_30d_pct: round_change(chg_30d),
            stability_score: assessment.score,
            rating: assessment.rating,
            regime: assessment.regime,
        }
    }

    /// Builds a whole batch in input order. A repeated symbol keeps its
    /// first (highest market cap) occurrence.
    pub fn build_all(&self, quotes: &[RawAssetQuote]) -> Vec<AssetRecord> {
        let mut seen = HashSet::with_capacity(quotes.len());
        let mut records = Vec::with_capacity(quotes.len());

        for quote in quotes {
            let record = self.build(quote);
            if !seen.insert(record.symbol.clone()) {
                debug!("Dropping duplicate symbol '{}' ({})", record.symbol, record.name);
                continue;
            }
            records.push(record);
        }

        records
    }
}

// Finite values past the Decimal range saturate instead of vanishing.
fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value).or_else(|| {
        (value.abs() >= 1.0).then(|| {
            if value.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
    })
}

fn round_to(value: Decimal, decimals: u32) -> Decimal {
    value
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

// A zero price would read as a worthless asset, so it becomes null. Sub-cent
// prices that vanish at 4 dp keep their significant digits instead.
fn round_price(price: Option<f64>) -> Option<Decimal> {
    let exact = price.and_then(to_decimal).filter(|p| !p.is_zero())?;
    let rounded = round_to(exact, PRICE_DECIMALS);
    if !rounded.is_zero() {
        return Some(rounded);
    }
    exact
        .round_sf_with_strategy(PRICE_SIGNIFICANT_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .map(|p| p.normalize())
}

fn round_change(change: Option<f64>) -> Decimal {
    change
        .and_then(to_decimal)
        .map(|c| round_to(c, CHANGE_DECIMALS))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::{Rating, Regime};
    use rust_decimal_macros::dec;

    #[test]
    fn test_builds_reference_record() {
        let quote = RawAssetQuote::new("btc")
            .with_price(50000.0)
            .with_changes(2.0, -4.0, 10.0);

        let record = AssetRecordBuilder::default().build(&quote);

        assert_eq!(record.symbol, "BTC");
        assert_eq!(record.price, Some(dec!(50000)));
        assert_eq!(record.chg_24h_pct, dec!(2.0));
        assert_eq!(record.chg_7d_pct, dec!(-4.0));
        assert_eq!(record.chg_30d_pct, dec!(10.0));
        assert_eq!(record.stability_score, 89);
        assert_eq!(record.rating, Rating::A);
        assert_eq!(record.regime, Regime::Stable);
        assert_eq!(
            record.link.as_deref(),
            Some("https://www.binance.com/en/trade/BTC_USDT")
        );
    }

    #[test]
    fn test_rounds_price_and_changes() {
        let quote = RawAssetQuote::new("eth")
            .with_price(2345.678951)
            .with_changes(1.005, -0.125, 33.3333);

        let record = AssetRecordBuilder::default().build(&quote);

        assert_eq!(record.price, Some(dec!(2345.679)));
        assert_eq!(record.chg_7d_pct, dec!(-0.13));
        assert_eq!(record.chg_30d_pct, dec!(33.33));
    }

    #[test]
    fn test_missing_fields_default() {
        let quote = RawAssetQuote {
            symbol: Some("sol".to_string()),
            price_change_percentage_24h: Some(-12.0),
            ..RawAssetQuote::default()
        };

        let record = AssetRecordBuilder::default().build(&quote);

        assert_eq!(record.name, "");
        assert_eq!(record.price, None);
        assert_eq!(record.chg_7d_pct, Decimal::ZERO);
        assert_eq!(record.chg_30d_pct, Decimal::ZERO);
        // (12 + 0 + 0) / 3 * 2 = 8 -> 92
        assert_eq!(record.stability_score, 92);
    }

    #[test]
    fn test_zero_price_is_null() {
        let quote = RawAssetQuote::new("dead").with_price(0.0);
        assert_eq!(AssetRecordBuilder::default().build(&quote).price, None);
    }

    #[test]
    fn test_missing_symbol_has_no_link() {
        let record = AssetRecordBuilder::default().build(&RawAssetQuote::default());
        assert_eq!(record.symbol, "");
        assert_eq!(record.link, None);
    }

    #[test]
    fn test_referral_code_is_appended() {
        let link = VenueLink::new("https://www.binance.com/en/trade/", Some("12345".to_string()))
            .unwrap();
        assert_eq!(
            link.for_symbol("PEPE").as_deref(),
            Some("https://www.binance.com/en/trade/PEPE_USDT?type=spot&ref=12345")
        );
    }

    #[test]
    fn test_invalid_link_base_is_rejected() {
        assert!(VenueLink::new("not a url", None).is_err());
        assert!(VenueLink::new("mailto:ops@example.com", None).is_err());
    }

    #[test]
    fn test_build_all_keeps_order_and_first_duplicate() {
        let quotes = vec![
            RawAssetQuote::new("btc").with_price(1.0),
            RawAssetQuote::new("eth").with_price(2.0),
            RawAssetQuote::new("BTC").with_price(3.0),
            RawAssetQuote::new("sol").with_price(4.0),
        ];

        let records = AssetRecordBuilder::default().build_all(&quotes);
        let symbols: Vec<&str> = records.iter().map(|r| r.symbol.as_str()).collect();

        assert_eq!(symbols, vec!["BTC", "ETH", "SOL"]);
        assert_eq!(records[0].price, Some(dec!(1)));
    }

    #[test]
    fn test_tiny_price_keeps_significant_digits() {
        let quote = RawAssetQuote::new("shib").with_price(0.00001234);
        assert_eq!(
            AssetRecordBuilder::default().build(&quote).price,
            Some(dec!(0.00001234))
        );

        let quote = RawAssetQuote::new("pepe").with_price(0.0000087654321);
        assert_eq!(
            AssetRecordBuilder::default().build(&quote).price,
            Some(dec!(0.000008765))
        );
    }

    #[test]
    fn test_out_of_range_changes_saturate() {
        let quote = RawAssetQuote::new("moon").with_changes(1e30, -1e30, 0.0);
        let record = AssetRecordBuilder::default().build(&quote);

        assert_eq!(record.chg_24h_pct, Decimal::MAX);
        assert_eq!(record.chg_7d_pct, Decimal::MIN);
        assert_eq!(record.chg_30d_pct, Decimal::ZERO);
        assert_eq!(record.stability_score, 0);
    }

    #[test]
    fn test_link_symbol_is_percent_encoded_with_or_without_referral() {
        let plain = VenueLink::default();
        let referred =
            VenueLink::new(DEFAULT_VENUE_BASE_URL, Some("12345".to_string())).unwrap();

        assert_eq!(
            plain.for_symbol("A?B#C").as_deref(),
            Some("https://www.binance.com/en/trade/A%3FB%23C_USDT")
        );
        assert_eq!(
            referred.for_symbol("A?B#C").as_deref(),
            Some("https://www.binance.com/en/trade/A%3FB%23C_USDT?type=spot&ref=12345")
        );
        assert_eq!(
            plain.for_symbol("É").as_deref(),
            Some("https://www.binance.com/en/trade/%C3%89_USDT")
        );
    }
}
