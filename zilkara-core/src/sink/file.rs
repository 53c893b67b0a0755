// sink/file.rs
// Pretty JSON snapshot file, replaced atomically via write-then-rename.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;
use zilkara_common::data::Snapshot;

use super::{SinkError, SnapshotSink};

pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot currently on disk.
    pub async fn load(&self) -> Result<Snapshot, SinkError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SinkError::io(&self.path, e))?;
        Ok(Snapshot::from_json(&raw)?)
    }

    // Sibling of the target so the final rename stays on one filesystem.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotSink for FileSink {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn persist(&self, snapshot: &Snapshot) -> Result<(), SinkError> {
        let json = snapshot.to_json_pretty()?;
        let staging = self.staging_path();

        tokio::fs::write(&staging, json.as_bytes())
            .await
            .map_err(|e| SinkError::io(&staging, e))?;

        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(SinkError::io(&self.path, e));
        }

        debug!("Wrote {} bytes to {}", json.len(), self.path.display());
        Ok(())
    }
}
