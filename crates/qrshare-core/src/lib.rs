//! Core types and traits for the QRShare publish subsystem.
//!
//! This crate holds the alias codec together with the record type and the
//! store and publisher contracts shared by the storage backends, the
//! publisher service and the HTTP gateway.

pub mod alias;
pub mod codec;
pub mod error;
pub mod language;
pub mod publisher;
pub mod record;
pub mod store;

pub use alias::Alias;
pub use error::{CodecError, PublishError, StoreError};
pub use language::Language;
pub use publisher::{PublishParams, Published, Publisher};
pub use record::PublishedText;
pub use store::PublishStore;
