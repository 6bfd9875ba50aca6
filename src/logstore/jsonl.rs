use super::CallLogStore;
use crate::accounting::CallLogRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

/// File-backed store: one JSON object per line, appended under a lock so
/// concurrent finalizations write whole lines.
pub struct JsonlLogStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlLogStore {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create call log directory {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl CallLogStore for JsonlLogStore {
    async fn append(&self, record: CallLogRecord) -> Result<()> {
        let mut line =
            serde_json::to_string(&record).context("Failed to serialize call record")?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open call log {}", self.path.display()))?;

        file.write_all(line.as_bytes())
            .await
            .context("Failed to append call record")?;
        file.flush().await?;

        Ok(())
    }

    async fn query_all(&self) -> Result<Vec<CallLogRecord>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            // No file yet means no calls logged yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read call log {}", self.path.display())
                })
            }
        };

        let mut records = Vec::new();
        for line in raw.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<CallLogRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping corrupt call log line: {}", e),
            }
        }

        Ok(records)
    }

    async fn query_recent(&self, n: usize) -> Result<Vec<CallLogRecord>> {
        let mut records = self.query_all().await?;
        let start = records.len().saturating_sub(n);
        let mut recent = records.split_off(start);
        recent.reverse();
        Ok(recent)
    }
}
