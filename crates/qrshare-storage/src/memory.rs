use async_trait::async_trait;
use dashmap::DashMap;
use qrshare_core::store::{PublishStore, Result};
use qrshare_core::{Alias, PublishedText};
use tracing::trace;

/// In-memory implementation of [`PublishStore`] using DashMap.
///
/// DashMap shards its locks, so saves and reads of different aliases do not
/// block each other. Contents are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    storage: DashMap<String, PublishedText>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Drops the record for `alias`, emulating eviction by the medium.
    pub fn evict(&self, alias: &Alias) -> bool {
        self.storage.remove(alias.as_str()).is_some()
    }
}

#[async_trait]
impl PublishStore for InMemoryStore {
    async fn save(&self, record: &PublishedText) -> Result<()> {
        trace!(alias = %record.id, "saving record in memory");
        self.storage
            .insert(record.id.as_str().to_owned(), record.clone());
        Ok(())
    }

    async fn get(&self, alias: &Alias) -> Result<Option<PublishedText>> {
        Ok(self
            .storage
            .get(alias.as_str())
            .map(|entry| entry.value().clone()))
    }
}
