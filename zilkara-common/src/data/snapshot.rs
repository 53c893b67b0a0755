// zilkara-common/src/data/snapshot.rs
// One complete, timestamped run output.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::types::{AssetRecord, DataError, DataResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
    pub count: usize,
    pub assets: Vec<AssetRecord>,
}

impl Snapshot {
    /// Wraps records stamped with an explicit unix timestamp (seconds).
    pub fn new(assets: Vec<AssetRecord>, updated_at: i64) -> Self {
        Self {
            updated_at,
            count: assets.len(),
            assets,
        }
    }

    /// Wraps records stamped with the current time.
    pub fn stamped(assets: Vec<AssetRecord>) -> Self {
        Self::new(assets, Utc::now().timestamp())
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn to_json_pretty(&self) -> DataResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a stored snapshot and rejects payloads whose `count` header
    /// disagrees with the asset list.
    pub fn from_json(raw: &str) -> DataResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> DataResult<()> {
        if self.count != self.assets.len() {
            return Err(DataError::CountMismatch {
                declared: self.count,
                actual: self.assets.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builder::AssetRecordBuilder;
    use crate::data::types::RawAssetQuote;
    use serde_json::Value;

    fn sample_records() -> Vec<AssetRecord> {
        let quotes = vec![
            RawAssetQuote::new("btc").with_price(50000.0).with_changes(2.0, -4.0, 10.0),
            RawAssetQuote::new("eth").with_price(2500.5).with_changes(-1.0, 3.5, -20.0),
            RawAssetQuote::new("doge"),
        ];
        AssetRecordBuilder::default().build_all(&quotes)
    }

    #[test]
    fn test_count_tracks_assets() {
        let snapshot = Snapshot::new(sample_records(), 1_700_000_000);
        assert_eq!(snapshot.count, 3);
        assert!(snapshot.validate().is_ok());

        let empty = Snapshot::stamped(Vec::new());
        assert_eq!(empty.count, 0);
        assert!(empty.is_empty());
        assert!(empty.updated_at > 0);
    }

    #[test]
    fn test_file_format_keys() {
        let snapshot = Snapshot::new(sample_records(), 1_700_000_000);
        let value: Value = serde_json::from_str(&snapshot.to_json_pretty().unwrap()).unwrap();

        assert_eq!(value["updatedAt"], 1_700_000_000);
        assert_eq!(value["count"], 3);

        let btc = &value["assets"][0];
        assert_eq!(btc["asset"], "BTC");
        assert_eq!(btc["price"].as_f64(), Some(50000.0));
        assert_eq!(btc["chg_24h_pct"].as_f64(), Some(2.0));
        assert_eq!(btc["chg_7d_pct"].as_f64(), Some(-4.0));
        assert_eq!(btc["stability_score"], 89);
        assert_eq!(btc["rating"], "A");
        assert_eq!(btc["regime"], "STABLE");
        assert_eq!(btc["link"], "https://www.binance.com/en/trade/BTC_USDT");

        let doge = &value["assets"][2];
        assert!(doge["price"].is_null());
        assert_eq!(doge["chg_30d_pct"].as_f64(), Some(0.0));
    }

    #[test]
    fn test_reads_back_written_snapshot() {
        let snapshot = Snapshot::new(sample_records(), 1_700_000_000);
        let parsed = Snapshot::from_json(&snapshot.to_json_pretty().unwrap()).unwrap();

        assert_eq!(parsed.count, snapshot.count);
        let symbols: Vec<&str> = parsed.assets.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "DOGE"]);
    }

    #[test]
    fn test_rejects_count_mismatch() {
        let raw = r#"{"updatedAt": 1, "count": 2, "assets": []}"#;
        assert!(matches!(
            Snapshot::from_json(raw),
            Err(DataError::CountMismatch { declared: 2, actual: 0 })
        ));
    }
}
