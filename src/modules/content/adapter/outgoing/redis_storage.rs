use std::sync::Arc;

use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};

use crate::content::application::ports::outgoing::key_value_store::{KeyValueStore, StorageError};

/// Redis-backed key-value storage.
///
/// Keys are namespaced as `content:cache:{key}`. No TTL is set on the Redis
/// side: freshness is decided by the timestamp inside the entry, and an
/// expired entry must stay readable as a fallback.
#[derive(Clone)]
pub struct RedisStorage {
    pool: Arc<Pool>,
}

impl RedisStorage {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    fn namespaced(key: &str) -> String {
        format!("content:cache:{key}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, StorageError> {
        self.pool
            .get()
            .await
            .map_err(|e| StorageError::Backend(format!("Pool error: {}", e)))
    }
}

#[async_trait]
impl KeyValueStore for RedisStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.get_conn().await?;
        conn.get::<_, Option<String>>(Self::namespaced(key))
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.get_conn().await?;
        conn.set::<_, _, ()>(Self::namespaced(key), value)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.get_conn().await?;
        conn.del::<_, ()>(Self::namespaced(key))
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}
