//! Disposable backing services for integration tests.
//!
//! Requires a reachable Docker daemon.

pub mod error;
pub mod mysql;
pub mod redis;

pub use error::{Result, TestInfraError};
