//! Storage backends for published texts.
//!
//! Every backend implements [`qrshare_core::PublishStore`]; pick one at
//! startup and inject it into the publisher service.

pub mod file;
pub mod key;
pub mod memory;
pub mod mysql;
pub mod redis;

pub use self::file::FileStore;
pub use self::memory::InMemoryStore;
pub use self::mysql::MySqlStore;
pub use self::redis::RedisStore;
pub use qrshare_core::{PublishStore, StoreError};
