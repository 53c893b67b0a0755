// sink/cache.rs
// Key-value push: one SET of the whole payload under a fixed key.

use ::redis::AsyncCommands;
use async_trait::async_trait;
use tracing::debug;
use zilkara_common::data::{AssetRecord, Snapshot};

use super::{SinkError, SnapshotSink};
use crate::config::{CacheConfig, CachePayload};

pub struct RedisSink {
    client: ::redis::Client,
    key: String,
    payload: CachePayload,
}

impl RedisSink {
    /// Parses the URL only; the connection is opened per write.
    pub fn new(url: &str, key: impl Into<String>, payload: CachePayload) -> Result<Self, SinkError> {
        Ok(Self {
            client: ::redis::Client::open(url)?,
            key: key.into(),
            payload,
        })
    }

    /// `None` when no cache URL is configured.
    pub fn from_config(config: &CacheConfig) -> Result<Option<Self>, SinkError> {
        match config.url.as_deref() {
            Some(url) => Ok(Some(Self::new(url, config.key.clone(), config.payload)?)),
            None => Ok(None),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn encode(&self, snapshot: &Snapshot) -> Result<String, SinkError> {
        let encoded = match self.payload {
            CachePayload::Snapshot => serde_json::to_string(snapshot)?,
            CachePayload::Assets => serde_json::to_string(&snapshot.assets)?,
        };
        Ok(encoded)
    }

    /// Number of assets in a stored payload.
    pub fn decode_count(&self, raw: &str) -> Result<usize, SinkError> {
        let count = match self.payload {
            CachePayload::Snapshot => Snapshot::from_json(raw)?.count,
            CachePayload::Assets => serde_json::from_str::<Vec<AssetRecord>>(raw)?.len(),
        };
        Ok(count)
    }

    /// Reads the whole entry back. `None` if the key is absent.
    pub async fn stored_count(&self) -> Result<Option<usize>, SinkError> {
        let mut con = self.client.get_async_connection().await?;
        let raw: Option<String> = con.get(&self.key).await?;
        raw.map(|r| self.decode_count(&r)).transpose()
    }
}

#[async_trait]
impl SnapshotSink for RedisSink {
    fn describe(&self) -> String {
        format!("cache key '{}'", self.key)
    }

    async fn persist(&self, snapshot: &Snapshot) -> Result<(), SinkError> {
        let payload = self.encode(snapshot)?;
        let mut con = self.client.get_async_connection().await?;
        con.set::<_, _, ()>(&self.key, &payload).await?;

        debug!("SET {} ({} bytes)", self.key, payload.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use zilkara_common::data::{AssetRecordBuilder, RawAssetQuote};

    fn snapshot() -> Snapshot {
        let quotes = vec![RawAssetQuote::new("btc"), RawAssetQuote::new("eth")];
        Snapshot::new(AssetRecordBuilder::default().build_all(&quotes), 42)
    }

    #[test]
    fn test_snapshot_payload_round_trips_count() {
        let sink = RedisSink::new("redis://127.0.0.1/", "assets_payload", CachePayload::Snapshot)
            .unwrap();
        let encoded = sink.encode(&snapshot()).unwrap();

        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["updatedAt"], 42);
        assert_eq!(sink.decode_count(&encoded).unwrap(), 2);
    }

    #[test]
    fn test_assets_payload_is_bare_list() {
        let sink =
            RedisSink::new("redis://127.0.0.1/", "assets", CachePayload::Assets).unwrap();
        let encoded = sink.encode(&snapshot()).unwrap();

        let value: Value = serde_json::from_str(&encoded).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["asset"], "BTC");
        assert_eq!(sink.decode_count(&encoded).unwrap(), 2);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(RedisSink::new("not-a-redis-url", "k", CachePayload::Snapshot).is_err());
    }

    #[test]
    fn test_no_url_means_no_sink() {
        let config = CacheConfig {
            url: None,
            key: "assets_payload".to_string(),
            payload: CachePayload::Snapshot,
        };
        assert!(RedisSink::from_config(&config).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_cache_fails_the_write() {
        let sink = RedisSink::new("redis://127.0.0.1:1/", "k", CachePayload::Snapshot).unwrap();
        assert!(matches!(
            sink.persist(&snapshot()).await,
            Err(SinkError::Cache(_))
        ));
    }
}
