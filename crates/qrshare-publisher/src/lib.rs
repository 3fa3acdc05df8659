//! Publish service for QRShare.
//!
//! [`PublisherService`] validates input, derives aliases through the codec,
//! fills in default metadata and resolves aliases with a fallback to
//! decoding the alias when the store has no record. Core types are
//! re-exported from `qrshare_core`.

pub mod config;
pub mod defaults;
pub mod service;

pub use config::PublisherConfig;
pub use qrshare_core::{PublishError, PublishParams, Published, Publisher};
pub use service::PublisherService;
