use crate::alias::Alias;
use crate::error::StoreError;
use crate::record::PublishedText;
use async_trait::async_trait;
use std::sync::Arc;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Durable key-value storage for [`PublishedText`] records, keyed by alias.
///
/// Implementations must tolerate arbitrary interleavings of `save` and `get`
/// across aliases without external synchronization.
#[async_trait]
pub trait PublishStore: Send + Sync + 'static {
    /// Stores `record` under `record.id`, replacing any existing record
    /// (last write wins). The write is atomic for that single key.
    async fn save(&self, record: &PublishedText) -> Result<()>;

    /// Retrieves the record for `alias`.
    /// Returns `Ok(None)` when no record exists; that is not an error.
    async fn get(&self, alias: &Alias) -> Result<Option<PublishedText>>;
}

#[async_trait]
impl<S: PublishStore + ?Sized> PublishStore for Arc<S> {
    async fn save(&self, record: &PublishedText) -> Result<()> {
        (**self).save(record).await
    }

    async fn get(&self, alias: &Alias) -> Result<Option<PublishedText>> {
        (**self).get(alias).await
    }
}
