use crate::key::alias_digest;
use async_trait::async_trait;
use qrshare_core::store::{PublishStore, Result};
use qrshare_core::{Alias, PublishedText, StoreError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace, warn};

/// A directory of JSON documents, one per published record.
///
/// Each record lives in `{sha256(alias)}.json`. Saves write a temporary
/// sibling first and rename it over the target, so readers observe either
/// the previous document or the new one, never a partial write.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    tmp_counter: AtomicU64,
}

impl FileStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| map_io_error("failed to create store directory", &root, e))?;

        debug!(root = %root.display(), "opened file store");
        Ok(Self {
            root,
            tmp_counter: AtomicU64::new(0),
        })
    }

    /// Returns the directory holding the records.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, alias: &Alias) -> PathBuf {
        self.root.join(format!("{}.json", alias_digest(alias)))
    }

    fn tmp_path(&self, target: &Path) -> PathBuf {
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let mut name = target.as_os_str().to_owned();
        name.push(format!(".{}.{n}.tmp", std::process::id()));
        PathBuf::from(name)
    }
}

fn map_io_error(operation: &str, path: &Path, err: std::io::Error) -> StoreError {
    let message = format!("{operation} '{}': {err}", path.display());
    match err.kind() {
        ErrorKind::TimedOut => StoreError::Timeout(message),
        _ => StoreError::Unavailable(message),
    }
}

#[async_trait]
impl PublishStore for FileStore {
    async fn save(&self, record: &PublishedText) -> Result<()> {
        let path = self.record_path(&record.id);
        trace!(alias = %record.id, path = %path.display(), "saving record to file");

        let json = serde_json::to_vec_pretty(record)
            .map_err(|e| StoreError::Operation(format!("failed to serialize record: {e}")))?;

        let tmp = self.tmp_path(&path);
        if let Err(e) = tokio::fs::write(&tmp, &json).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(map_io_error("failed to write record", &tmp, e));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(map_io_error("failed to move record into place", &path, e));
        }

        debug!(alias = %record.id, "saved record to file");
        Ok(())
    }

    async fn get(&self, alias: &Alias) -> Result<Option<PublishedText>> {
        let path = self.record_path(alias);
        trace!(alias = %alias, path = %path.display(), "reading record from file");

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io_error("failed to read record", &path, e)),
        };

        let record: PublishedText = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(alias = %alias, error = %e, "failed to deserialize stored record");
            StoreError::InvalidData(format!("invalid record '{}': {e}", path.display()))
        })?;

        if record.id != *alias {
            return Err(StoreError::InvalidData(format!(
                "record '{}' belongs to a different alias",
                path.display()
            )));
        }

        Ok(Some(record))
    }
}
