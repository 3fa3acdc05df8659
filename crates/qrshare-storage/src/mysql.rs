use crate::key::alias_digest;
use async_trait::async_trait;
use jiff::Timestamp;
use qrshare_core::store::{PublishStore, Result};
use qrshare_core::{Alias, Language, PublishedText, StoreError};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::{debug, trace};

/// MySQL implementation of the store contract.
///
/// Rows are keyed by the SHA-256 of the alias because aliases grow with
/// their text and cannot be indexed directly. Saves are a single
/// `INSERT ... ON DUPLICATE KEY UPDATE`, so the last write wins.
/// Timestamps are kept as microseconds since the Unix epoch.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Operation(format!("migration failed: {e}")))?;
        debug!("applied published_texts migrations");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn parse_timestamp(micros: Option<i64>) -> Result<Option<Timestamp>> {
    micros
        .map(|value| {
            Timestamp::from_microsecond(value).map_err(|e| {
                StoreError::InvalidData(format!("invalid timestamp '{value}': {e}"))
            })
        })
        .transpose()
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StoreError::InvalidData(message),
        _ => StoreError::Query(message),
    }
}

fn row_to_record(row: &MySqlRow) -> Result<PublishedText> {
    let alias: String = row.try_get("alias").map_err(map_sqlx_error)?;
    let id = Alias::parse(alias)
        .map_err(|e| StoreError::InvalidData(format!("stored alias is invalid: {e}")))?;

    let language: String = row.try_get("language").map_err(map_sqlx_error)?;
    let language = language
        .parse::<Language>()
        .map_err(|e| StoreError::InvalidData(e.to_string()))?;

    Ok(PublishedText {
        id,
        title: row.try_get("title").map_err(map_sqlx_error)?,
        description: row.try_get("description").map_err(map_sqlx_error)?,
        language,
        text: row.try_get("text").map_err(map_sqlx_error)?,
        prefix: row.try_get("prefix").map_err(map_sqlx_error)?,
        created_at: parse_timestamp(row.try_get("created_at").map_err(map_sqlx_error)?)?,
        updated_at: parse_timestamp(row.try_get("updated_at").map_err(map_sqlx_error)?)?,
    })
}

#[async_trait]
impl PublishStore for MySqlStore {
    async fn save(&self, record: &PublishedText) -> Result<()> {
        trace!(alias = %record.id, "upserting record in MySQL");

        sqlx::query(
            r#"
            INSERT INTO published_texts
                (alias_hash, alias, title, description, language, text, prefix, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                title = VALUES(title),
                description = VALUES(description),
                language = VALUES(language),
                prefix = VALUES(prefix),
                created_at = VALUES(created_at),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(alias_digest(&record.id))
        .bind(record.id.as_str())
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.language.as_str())
        .bind(&record.text)
        .bind(record.prefix.as_deref())
        .bind(record.created_at.map(|ts| ts.as_microsecond()))
        .bind(record.updated_at.map(|ts| ts.as_microsecond()))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn get(&self, alias: &Alias) -> Result<Option<PublishedText>> {
        let row = sqlx::query(
            r#"
            SELECT alias, title, description, language, text, prefix, created_at, updated_at
            FROM published_texts
            WHERE alias_hash = ?
            LIMIT 1
            "#,
        )
        .bind(alias_digest(alias))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let record = row_to_record(&row)?;
        if record.id != *alias {
            return Err(StoreError::InvalidData(format!(
                "row for '{alias}' holds a different alias"
            )));
        }

        Ok(Some(record))
    }
}
