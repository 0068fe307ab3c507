use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::services::kv::store::{KvResult, KvStore};

/// In-process KV store (`KV_URL=memory://`). Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl KvStore for MemoryKv {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> KvResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> KvResult<u64> {
        Ok(self.entries.write().await.remove(key).map_or(0, |_| 1))
    }
}
