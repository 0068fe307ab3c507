//! KV store interface used by handlers through the KV binding.
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Result type for KV operations.
pub type KvResult<T> = Result<T, KvError>;

/// KV backend errors (transport/command).
///
/// Note:
/// - Kept independent from `AppError`; an unbound store is not a `KvError`,
///   it is reported by `AppState::kv()` as a missing binding.
#[derive(Debug, Error)]
pub enum KvError {
    #[error("kv connection error: {0}")]
    Connection(String),
    #[error("kv command error: {0}")]
    Command(String),
}

/// A minimal string key/value store.
#[async_trait]
pub trait KvStore: fmt::Debug + Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn get(&self, key: &str) -> KvResult<Option<String>>;

    async fn put(&self, key: &str, value: &str) -> KvResult<()>;

    // Returns number of deleted keys.
    async fn delete(&self, key: &str) -> KvResult<u64>;
}
