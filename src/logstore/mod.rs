//! Durable call-log storage
//!
//! Finalized `CallLogRecord`s are append-only: written once, never updated.
//! The backend has been swapped before (flat JSON file, then a document
//! store), so everything upstream talks to the `CallLogStore` trait only
//! and the concrete backend is chosen from configuration.

mod jsonl;
mod memory;

pub use jsonl::JsonlLogStore;
pub use memory::MemoryLogStore;

use crate::accounting::CallLogRecord;
use crate::config::StorageConfig;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Append-only store of finalized call records.
///
/// Ordering contract: `query_all` returns insertion order (oldest first);
/// `query_recent` returns the newest `n` records, newest first. Reads must
/// reflect every append that completed before the read began.
#[async_trait]
pub trait CallLogStore: Send + Sync {
    async fn append(&self, record: CallLogRecord) -> Result<()>;

    async fn query_all(&self) -> Result<Vec<CallLogRecord>>;

    async fn query_recent(&self, n: usize) -> Result<Vec<CallLogRecord>>;
}

/// Build the store selected by configuration.
pub fn from_config(cfg: &StorageConfig) -> Result<Arc<dyn CallLogStore>> {
    match cfg.backend.as_str() {
        "jsonl" => Ok(Arc::new(JsonlLogStore::new(&cfg.path)?)),
        "memory" => Ok(Arc::new(MemoryLogStore::new())),
        other => anyhow::bail!("unknown storage backend: {}", other),
    }
}
