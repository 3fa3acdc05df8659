use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors produced while decoding or validating an alias.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("malformed alias: {0}")]
    MalformedAlias(String),
}

/// Failures of a [`PublishStore`][crate::store::PublishStore] backend.
///
/// None of these mean "not found": absence is reported as `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}

impl StoreError {
    /// Returns `true` when the backing medium itself could not be reached.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Timeout(_))
    }
}

/// Errors surfaced by the publish service to its callers.
#[derive(Debug, Clone, Error)]
pub enum PublishError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<StoreError> for PublishError {
    fn from(value: StoreError) -> Self {
        Self::StoreUnavailable(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_grouping() {
        assert!(StoreError::Unavailable("down".into()).is_unavailable());
        assert!(StoreError::Timeout("slow".into()).is_unavailable());
        assert!(!StoreError::InvalidData("bad json".into()).is_unavailable());
    }

    #[test]
    fn every_store_error_becomes_store_unavailable() {
        let err: PublishError = StoreError::Query("syntax".into()).into();
        assert!(matches!(err, PublishError::StoreUnavailable(_)));
    }
}
