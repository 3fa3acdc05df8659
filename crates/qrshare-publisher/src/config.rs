use typed_builder::TypedBuilder;

/// Default ceiling on the size of a published text.
pub const DEFAULT_MAX_TEXT_BYTES: usize = 1024 * 1024;

/// Default ceiling on a user-supplied title or description.
pub const DEFAULT_MAX_METADATA_BYTES: usize = 16 * 1024;

/// Settings of a [`PublisherService`][crate::PublisherService].
#[derive(Debug, Clone, TypedBuilder)]
pub struct PublisherConfig {
    /// Base of published page URLs, e.g. `https://qr.example/p`.
    #[builder(setter(into))]
    pub base_url: String,

    /// Largest accepted `prefix + text`, in UTF-8 bytes.
    ///
    /// Must stay below [`qrshare_core::codec::MAX_DECODED_BYTES`] so every
    /// published alias can be decoded again.
    #[builder(default = DEFAULT_MAX_TEXT_BYTES)]
    pub max_text_bytes: usize,

    /// Largest accepted title or description, in UTF-8 bytes.
    #[builder(default = DEFAULT_MAX_METADATA_BYTES)]
    pub max_metadata_bytes: usize,
}
