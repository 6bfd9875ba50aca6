use super::CallLogStore;
use crate::accounting::CallLogRecord;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory store for tests and ephemeral deployments. Records do not
/// survive a restart.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    records: RwLock<Vec<CallLogRecord>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CallLogStore for MemoryLogStore {
    async fn append(&self, record: CallLogRecord) -> Result<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn query_all(&self) -> Result<Vec<CallLogRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn query_recent(&self, n: usize) -> Result<Vec<CallLogRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().rev().take(n).cloned().collect())
    }
}
