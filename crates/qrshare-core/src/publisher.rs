use crate::alias::Alias;
use crate::error::PublishError;
use crate::record::PublishedText;
use async_trait::async_trait;
use serde::Serialize;
use typed_builder::TypedBuilder;

type Result<T> = std::result::Result<T, PublishError>;

/// Parameters for publishing a text.
///
/// ```
/// use qrshare_core::PublishParams;
///
/// let params = PublishParams::builder()
///     .text("alice@example.com")
///     .prefix("mailto:")
///     .build();
/// assert_eq!(params.full_text(), "mailto:alice@example.com");
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct PublishParams {
    /// The user-entered text.
    #[builder(setter(into))]
    pub text: String,
    /// Prepended to `text` before encoding (`mailto:`, `tel:`, `WIFI:` ...).
    #[builder(default, setter(strip_option, into))]
    pub prefix: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub title: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
    /// A locale tag such as `"en"` or `"zh-CN"`.
    #[builder(default, setter(strip_option, into))]
    pub language: Option<String>,
}

impl PublishParams {
    /// The payload that gets encoded: `prefix + text`.
    pub fn full_text(&self) -> String {
        match self.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}{}", self.text),
            _ => self.text.clone(),
        }
    }
}

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Published {
    pub alias: Alias,
    /// Fully-qualified URL of the published page.
    pub url: String,
    pub record: PublishedText,
}

#[async_trait]
pub trait Publisher: Send + Sync + 'static {
    /// Publishes a text under its derived alias.
    async fn publish(&self, params: PublishParams) -> Result<Published>;

    /// Resolves an alias to its record, falling back to decoding the alias
    /// itself when the store has nothing to offer.
    async fn resolve(&self, alias: &str) -> Result<PublishedText>;
}
