// zilkara-core/src/sink/mod.rs

pub mod cache;
pub mod errors;
pub mod file;

use async_trait::async_trait;
use zilkara_common::data::Snapshot;

pub use self::cache::RedisSink;
pub use self::errors::SinkError;
pub use self::file::FileSink;

/// A durable target for a whole snapshot. Every write replaces what was stored.
#[async_trait]
pub trait SnapshotSink: Send + Sync {
    fn describe(&self) -> String;

    async fn persist(&self, snapshot: &Snapshot) -> Result<(), SinkError>;
}
