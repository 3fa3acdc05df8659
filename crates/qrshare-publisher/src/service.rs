use crate::config::PublisherConfig;
use crate::defaults::{default_description, default_title, non_blank};
use async_trait::async_trait;
use jiff::Timestamp;
use qrshare_core::codec::{self, MAX_DECODED_BYTES};
use qrshare_core::language::UnknownLanguage;
use qrshare_core::{
    Alias, Language, PublishError, PublishParams, PublishStore, Published, PublishedText,
    Publisher,
};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// A concrete implementation of the [`Publisher`] trait.
///
/// This service wraps an injected [`PublishStore`] and handles:
/// - Input validation
/// - Alias derivation through the codec
/// - Metadata defaulting
/// - Two-tier resolution: store first, alias decoding second
///
/// Store failures are never retried here; the caller decides.
#[derive(Debug, Clone)]
pub struct PublisherService<S> {
    store: Arc<S>,
    config: PublisherConfig,
}

impl<S: PublishStore> PublisherService<S> {
    /// Creates a new `PublisherService` on top of `store`.
    pub fn new(store: S, mut config: PublisherConfig) -> Self {
        config.max_text_bytes = config.max_text_bytes.min(MAX_DECODED_BYTES);
        Self {
            store: Arc::new(store),
            config,
        }
    }

    /// Returns a reference to the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// Rejects input before anything is encoded.
    fn validate(&self, params: &PublishParams, full_text: &str) -> Result<(), PublishError> {
        if params.text.trim().is_empty() {
            return Err(PublishError::InvalidInput(
                "text cannot be empty".to_string(),
            ));
        }

        if full_text.len() > self.config.max_text_bytes {
            return Err(PublishError::InvalidInput(format!(
                "text is {} bytes, the limit is {}",
                full_text.len(),
                self.config.max_text_bytes
            )));
        }

        for (field, value) in [("title", &params.title), ("description", &params.description)] {
            let len = value.as_deref().map_or(0, str::len);
            if len > self.config.max_metadata_bytes {
                return Err(PublishError::InvalidInput(format!(
                    "{field} is {len} bytes, the limit is {}",
                    self.config.max_metadata_bytes
                )));
            }
        }

        Ok(())
    }

    fn parse_language(tag: Option<&str>) -> Result<Language, PublishError> {
        match tag.map(str::trim).filter(|t| !t.is_empty()) {
            Some(tag) => tag
                .parse()
                .map_err(|e: UnknownLanguage| {
                    PublishError::InvalidInput(e.to_string())
                }),
            None => Ok(Language::default()),
        }
    }

    /// First tier of resolution. A store failure counts as a miss.
    async fn lookup_store(&self, alias: &Alias) -> Option<PublishedText> {
        match self.store.get(alias).await {
            Ok(Some(record)) => {
                debug!(alias = %alias, "resolved from store");
                Some(record)
            }
            Ok(None) => {
                trace!(alias = %alias, "alias not in store");
                None
            }
            Err(e) => {
                warn!(alias = %alias, error = %e, "store lookup failed, falling back to alias");
                None
            }
        }
    }

    /// Second tier of resolution: rebuild a minimal record from the alias.
    fn recover_from_alias(alias: &Alias) -> Option<PublishedText> {
        match codec::decode_alias(alias) {
            Ok(text) => {
                debug!(alias = %alias, "recovered text from alias");
                Some(fallback_record(alias.clone(), text))
            }
            Err(e) => {
                debug!(alias = %alias, error = %e, "alias does not decode");
                None
            }
        }
    }
}

/// A record carrying only what the alias itself knows.
fn fallback_record(alias: Alias, text: String) -> PublishedText {
    PublishedText {
        id: alias,
        title: default_title(Timestamp::now()),
        description: default_description(&text),
        language: Language::default(),
        text,
        prefix: None,
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl<S: PublishStore> Publisher for PublisherService<S> {
    async fn publish(&self, params: PublishParams) -> Result<Published, PublishError> {
        let full_text = params.full_text();
        self.validate(&params, &full_text)?;
        let language = Self::parse_language(params.language.as_deref())?;

        let alias = codec::encode(&full_text);
        let now = Timestamp::now();

        let record = PublishedText {
            id: alias.clone(),
            title: non_blank(params.title).unwrap_or_else(|| default_title(now)),
            description: non_blank(params.description)
                .unwrap_or_else(|| default_description(&full_text)),
            language,
            text: full_text,
            prefix: params.prefix.filter(|p| !p.is_empty()),
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.store.save(&record).await.map_err(|e| {
            warn!(alias = %alias, error = %e, "failed to save published text");
            PublishError::from(e)
        })?;

        let url = alias.to_url(&self.config.base_url);
        info!(alias = %alias, bytes = record.text.len(), "published text");

        Ok(Published { alias, url, record })
    }

    async fn resolve(&self, alias: &str) -> Result<PublishedText, PublishError> {
        trace!(alias = %alias, "resolving alias");

        // Only well-formed aliases can key a record or decode.
        let Ok(alias) = Alias::parse(alias) else {
            debug!(alias = %alias, "malformed alias");
            return Err(PublishError::NotFound(alias.to_string()));
        };

        if let Some(record) = self.lookup_store(&alias).await {
            return Ok(record);
        }

        Self::recover_from_alias(&alias).ok_or_else(|| PublishError::NotFound(alias.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::ELLIPSIS;
    use qrshare_core::store::Result as StoreResult;
    use qrshare_core::StoreError;
    use qrshare_storage::InMemoryStore;

    const BASE_URL: &str = "https://qr.example/p";

    fn config() -> PublisherConfig {
        PublisherConfig::builder().base_url(BASE_URL).build()
    }

    fn test_service() -> PublisherService<InMemoryStore> {
        PublisherService::new(InMemoryStore::new(), config())
    }

    /// A store whose medium is never reachable.
    struct UnreachableStore;

    #[async_trait]
    impl PublishStore for UnreachableStore {
        async fn save(&self, _record: &PublishedText) -> StoreResult<()> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn get(&self, _alias: &Alias) -> StoreResult<Option<PublishedText>> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn publish_then_resolve() {
        let service = test_service();

        let params = PublishParams::builder().text("hello").prefix("").build();
        let published = service.publish(params).await.unwrap();

        let record = service.resolve(published.alias.as_str()).await.unwrap();
        assert_eq!(record.text, "hello");
        assert!(record.is_persisted());
        assert_eq!(record, published.record);
    }

    #[tokio::test]
    async fn publish_with_prefix() {
        let service = test_service();

        let params = PublishParams::builder()
            .text("alice@example.com")
            .prefix("mailto:")
            .build();
        let published = service.publish(params).await.unwrap();

        assert_eq!(published.record.text, "mailto:alice@example.com");
        assert_eq!(published.record.prefix.as_deref(), Some("mailto:"));
        assert_eq!(published.alias, codec::encode("mailto:alice@example.com"));
    }

    #[tokio::test]
    async fn publish_returns_url_under_base() {
        let service = test_service();

        let published = service
            .publish(PublishParams::builder().text("hello").build())
            .await
            .unwrap();

        assert_eq!(published.url, format!("{BASE_URL}/{}/", published.alias));
    }

    #[tokio::test]
    async fn publish_rejects_empty_text() {
        let service = test_service();

        for text in ["", "   \n"] {
            let err = service
                .publish(PublishParams::builder().text(text).prefix("tel:").build())
                .await
                .unwrap_err();
            assert!(matches!(err, PublishError::InvalidInput(_)));
        }
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn publish_rejects_oversized_text() {
        let service = PublisherService::new(
            InMemoryStore::new(),
            PublisherConfig::builder()
                .base_url(BASE_URL)
                .max_text_bytes(8)
                .build(),
        );

        let err = service
            .publish(PublishParams::builder().text("123456789").build())
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn publish_rejects_oversized_metadata() {
        let service = test_service();

        let err = service
            .publish(
                PublishParams::builder()
                    .text("hi")
                    .description("d".repeat(70_000))
                    .build(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::InvalidInput(_)));

        let err = service
            .publish(
                PublishParams::builder()
                    .text("hi")
                    .title("t".repeat(70_000))
                    .build(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::InvalidInput(_)));
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn metadata_at_the_limit_is_accepted() {
        let service = PublisherService::new(
            InMemoryStore::new(),
            PublisherConfig::builder()
                .base_url(BASE_URL)
                .max_metadata_bytes(4)
                .build(),
        );

        let record = service
            .publish(PublishParams::builder().text("hi").title("four").build())
            .await
            .unwrap()
            .record;
        assert_eq!(record.title, "four");

        let err = service
            .publish(PublishParams::builder().text("hi").title("fives").build())
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn publish_rejects_unknown_language() {
        let service = test_service();

        let err = service
            .publish(PublishParams::builder().text("x").language("xx-YY").build())
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn publish_defaults_metadata() {
        let service = test_service();

        let record = service
            .publish(PublishParams::builder().text("x").build())
            .await
            .unwrap()
            .record;

        assert_eq!(record.language, Language::En);
        assert!(record.title.starts_with("QR Code - "));
        assert_eq!(record.description, "x");
        assert_eq!(record.prefix, None);
        assert_eq!(record.created_at, record.updated_at);
    }

    #[tokio::test]
    async fn publish_truncates_generated_description() {
        let service = test_service();

        let record = service
            .publish(PublishParams::builder().text("y".repeat(150)).build())
            .await
            .unwrap()
            .record;

        assert!(record.description.chars().count() <= 103);
        assert!(record.description.ends_with(ELLIPSIS));
    }

    #[tokio::test]
    async fn publish_keeps_supplied_metadata() {
        let service = test_service();

        let record = service
            .publish(
                PublishParams::builder()
                    .text("hello")
                    .title("Greeting")
                    .description("Says hello")
                    .language("zh-CN")
                    .build(),
            )
            .await
            .unwrap()
            .record;

        assert_eq!(record.title, "Greeting");
        assert_eq!(record.description, "Says hello");
        assert_eq!(record.language, Language::Zh);
    }

    #[tokio::test]
    async fn blank_title_falls_back_to_default() {
        let service = test_service();

        let record = service
            .publish(PublishParams::builder().text("hello").title("  ").build())
            .await
            .unwrap()
            .record;

        assert!(record.title.starts_with("QR Code - "));
    }

    #[tokio::test]
    async fn republishing_keeps_alias_and_last_metadata_wins() {
        let service = test_service();

        let first = service
            .publish(PublishParams::builder().text("same").title("one").build())
            .await
            .unwrap();
        let second = service
            .publish(PublishParams::builder().text("same").title("two").build())
            .await
            .unwrap();

        assert_eq!(first.alias, second.alias);
        let record = service.resolve(first.alias.as_str()).await.unwrap();
        assert_eq!(record.title, "two");
        assert_eq!(service.store().len(), 1);
    }

    #[tokio::test]
    async fn resolve_falls_back_to_alias_without_record() {
        let service = test_service();
        let alias = codec::encode("WIFI:T:WPA;S:MyNet;P:pass;;");

        let record = service.resolve(alias.as_str()).await.unwrap();

        assert_eq!(record.text, "WIFI:T:WPA;S:MyNet;P:pass;;");
        assert_eq!(record.id, alias);
        assert_eq!(record.language, Language::En);
        assert!(record.title.starts_with("QR Code - "));
        assert!(!record.is_persisted());
    }

    #[tokio::test]
    async fn resolve_falls_back_after_eviction() {
        let service = test_service();
        let published = service
            .publish(PublishParams::builder().text("evict me").title("t").build())
            .await
            .unwrap();

        service.store().evict(&published.alias);

        let record = service.resolve(published.alias.as_str()).await.unwrap();
        assert_eq!(record.text, "evict me");
        assert_ne!(record.title, "t");
    }

    #[tokio::test]
    async fn resolve_falls_back_when_store_unavailable() {
        let service = PublisherService::new(UnreachableStore, config());
        let alias = codec::encode("tel:+15551234567");

        let record = service.resolve(alias.as_str()).await.unwrap();
        assert_eq!(record.text, "tel:+15551234567");
    }

    #[tokio::test]
    async fn publish_surfaces_store_failure() {
        let service = PublisherService::new(UnreachableStore, config());

        let err = service
            .publish(PublishParams::builder().text("hello").build())
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn resolve_malformed_alias_is_not_found() {
        let service = test_service();

        let err = service.resolve("not a valid alias!!").await.unwrap_err();
        assert!(matches!(err, PublishError::NotFound(_)));
    }

    #[tokio::test]
    async fn resolve_undecodable_alias_is_not_found() {
        let service = PublisherService::new(UnreachableStore, config());

        // Well-formed, but the deflate payload is garbage.
        let err = service.resolve("z_____w").await.unwrap_err();
        assert!(matches!(err, PublishError::NotFound(_)));
    }

    #[tokio::test]
    async fn concurrent_publishes_of_same_text_converge() {
        let service = Arc::new(test_service());
        let mut handles = vec![];

        for i in 0..8 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service
                    .publish(
                        PublishParams::builder()
                            .text("shared")
                            .title(format!("title {i}"))
                            .build(),
                    )
                    .await
                    .unwrap()
                    .alias
            }));
        }

        let mut aliases = vec![];
        for handle in handles {
            aliases.push(handle.await.unwrap());
        }

        assert!(aliases.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(service.store().len(), 1);
        let record = service.resolve(aliases[0].as_str()).await.unwrap();
        assert_eq!(record.text, "shared");
    }
}
