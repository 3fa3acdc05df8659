use crate::alias::Alias;
use crate::language::Language;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A published text as persisted by a [`PublishStore`][crate::store::PublishStore].
///
/// Field names serialize in camelCase:
/// `{id, title, description, language, text, prefix?, createdAt, updatedAt}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedText {
    /// The alias of `text`; primary key of the record.
    pub id: Alias,
    pub title: String,
    pub description: String,
    pub language: Language,
    /// The full payload, prefix included.
    pub text: String,
    /// The prefix (`mailto:`, `tel:`, `WIFI:` ...) the text was published with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Set at creation. `None` on records recovered from an alias alone.
    pub created_at: Option<Timestamp>,
    /// Equal to `created_at`; no mutation path exists yet.
    pub updated_at: Option<Timestamp>,
}

impl PublishedText {
    /// Whether the record came from a store rather than from the alias alone.
    pub fn is_persisted(&self) -> bool {
        self.created_at.is_some()
    }
}
