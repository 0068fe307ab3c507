use async_trait::async_trait;

use crate::services::kv::store::{KvError, KvResult, KvStore};

/// Valkey/Redis-backed KV store.
#[derive(Clone)]
pub struct ValkeyClient {
    manager: redis::aio::ConnectionManager,
}

impl std::fmt::Debug for ValkeyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValkeyClient").finish_non_exhaustive()
    }
}

impl ValkeyClient {
    // Create a Valkey client from a URL like `redis://localhost:6379`
    pub async fn new(url: &str) -> Result<Self, KvError> {
        let client = redis::Client::open(url).map_err(|e| KvError::Connection(e.to_string()))?;

        let manager = client
            .get_connection_manager()
            .await
            .map_err(|e| KvError::Connection(e.to_string()))?;

        Ok(Self { manager })
    }
}

#[async_trait]
impl KvStore for ValkeyClient {
    fn backend_name(&self) -> &'static str {
        "valkey"
    }

    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        // ConnectionManager is cheap to clone and reconnects on its own.
        let mut conn = self.manager.clone();

        let resp: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| KvError::Command(e.to_string()))?;

        Ok(resp)
    }

    async fn put(&self, key: &str, value: &str) -> KvResult<()> {
        let mut conn = self.manager.clone();

        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async(&mut conn)
            .await
            .map_err(|e| KvError::Command(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> KvResult<u64> {
        let mut conn = self.manager.clone();

        let n: u64 = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| KvError::Command(e.to_string()))?;

        Ok(n)
    }
}
