// zilkara-common/src/data/types.rs
// Shared data model: provider quotes in, scored asset records out.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

// =================================================================
// Errors
// =================================================================

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot count mismatch: header says {declared}, payload holds {actual}")]
    CountMismatch { declared: usize, actual: usize },

    #[error("Invalid link base URL '{0}'")]
    InvalidLinkBase(String),
}

pub type DataResult<T> = Result<T, DataError>;

// =================================================================
// Provider Input
// =================================================================

/// One row of the provider's market listing.
///
/// Field names follow the provider's wire format. Every numeric field is
/// read leniently: absent, `null`, non-numeric and non-finite values all
/// become `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawAssetQuote {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price_change_percentage_7d_in_currency: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price_change_percentage_30d_in_currency: Option<f64>,
}

impl RawAssetQuote {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: Some(symbol.to_string()),
            ..Self::default()
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    pub fn with_changes(mut self, chg_24h: f64, chg_7d: f64, chg_30d: f64) -> Self {
        self.price_change_percentage_24h = Some(chg_24h);
        self.price_change_percentage_7d_in_currency = Some(chg_7d);
        self.price_change_percentage_30d_in_currency = Some(chg_30d);
        self
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

// =================================================================
// Classification Labels
// =================================================================

/// Letter grade derived from the stability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    A,
    B,
    C,
    D,
}

/// Coarse market-state label derived from the stability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Regime {
    Stable,
    Transition,
    Volatile,
}

// =================================================================
// Output Record
// =================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    #[serde(rename = "asset", alias = "symbol")]
    pub symbol: String,
    pub name: String,
    pub price: Option<Decimal>,
    pub chg_24h_pct: Decimal,
    pub chg_7d_pct: Decimal,
    pub chg_30d_pct: Decimal,
    pub stability_score: u8,
    pub rating: Rating,
    pub regime: Regime,
    pub link: Option<String>,
}
