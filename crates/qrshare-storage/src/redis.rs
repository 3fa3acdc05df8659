use async_trait::async_trait;
use qrshare_core::store::{PublishStore, Result};
use qrshare_core::{Alias, PublishedText, StoreError};
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Default prefix of record keys.
pub const DEFAULT_KEY_PREFIX: &str = "qrshare:text:";

/// A Redis-backed [`PublishStore`].
///
/// Records are stored as JSON strings under `{key_prefix}{alias}`. With a TTL
/// configured, Redis evicts records on its own and resolution falls back to
/// decoding the alias.
#[derive(Clone)]
pub struct RedisStore {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
    ttl: Option<Duration>,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        StoreError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        StoreError::Unavailable(message)
    } else {
        StoreError::Operation(message)
    }
}

impl RedisStore {
    /// Creates a store on an existing multiplexed connection.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self {
            conn,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            ttl: None,
        }
    }

    /// Opens a multiplexed connection to `redis_url` and wraps it.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| map_redis_error("invalid redis url", e))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("failed to connect to Redis", e))?;
        Ok(Self::new(conn))
    }

    /// Uses a custom prefix for record keys (e.g. `"myapp:text:"`).
    pub fn with_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    /// Expires every saved record after `ttl`.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Generates the key of the record for `alias`.
    fn key(&self, alias: &Alias) -> String {
        format!("{}{}", self.key_prefix, alias.as_str())
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("key_prefix", &self.key_prefix)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PublishStore for RedisStore {
    async fn save(&self, record: &PublishedText) -> Result<()> {
        let key = self.key(&record.id);
        trace!(alias = %record.id, "storing record in Redis");

        let json = serde_json::to_string(record).map_err(|e| {
            StoreError::Operation(format!("failed to serialize record: {e}"))
        })?;

        let mut conn = self.conn.clone();
        let result = match self.ttl {
            Some(ttl) => conn.set_ex::<_, _, ()>(&key, json, ttl.as_secs().max(1)).await,
            None => conn.set::<_, _, ()>(&key, json).await,
        };

        match result {
            Ok(()) => {
                debug!(alias = %record.id, "stored record in Redis");
                Ok(())
            }
            Err(e) => {
                warn!(alias = %record.id, error = %e, "failed to store record in Redis");
                Err(map_redis_error("failed to write record to Redis", e))
            }
        }
    }

    async fn get(&self, alias: &Alias) -> Result<Option<PublishedText>> {
        let key = self.key(alias);
        trace!(alias = %alias, "fetching record from Redis");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(json)) => {
                debug!(alias = %alias, "record found in Redis");
                let record = serde_json::from_str::<PublishedText>(&json).map_err(|e| {
                    warn!(alias = %alias, error = %e, "failed to deserialize stored record");
                    StoreError::InvalidData(format!("invalid record for key '{key}': {e}"))
                })?;

                if record.id != *alias {
                    return Err(StoreError::InvalidData(format!(
                        "record under key '{key}' belongs to a different alias"
                    )));
                }

                Ok(Some(record))
            }
            Ok(None) => {
                trace!(alias = %alias, "record not in Redis");
                Ok(None)
            }
            Err(e) => {
                warn!(alias = %alias, error = %e, "Redis error on get");
                Err(map_redis_error("failed to fetch record from Redis", e))
            }
        }
    }
}
