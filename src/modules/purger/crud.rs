use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::error::CleanupResult;
use crate::modules::purger::model::Ttl;

// Keys are binary-safe, so they travel as raw bytes and are only decoded for display.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// All keys matching a glob pattern, fetched in one round trip.
    async fn keys(&self, pattern: &str) -> CleanupResult<Vec<Vec<u8>>>;

    async fn ttl(&self, key: &[u8]) -> CleanupResult<Ttl>;

    /// Returns whether the key existed.
    async fn delete(&self, key: &[u8]) -> CleanupResult<bool>;
}

pub struct KeyCrud {
    redis: ConnectionManager,
}

impl KeyCrud {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl KeyStore for KeyCrud {
    async fn keys(&self, pattern: &str) -> CleanupResult<Vec<Vec<u8>>> {
        let mut redis = self.redis.clone();
        Ok(redis.keys(pattern).await?)
    }

    async fn ttl(&self, key: &[u8]) -> CleanupResult<Ttl> {
        let mut redis = self.redis.clone();
        let raw: i64 = redis.ttl(key).await?;
        Ok(Ttl::from(raw))
    }

    async fn delete(&self, key: &[u8]) -> CleanupResult<bool> {
        let mut redis = self.redis.clone();
        let removed: u64 = redis.del(key).await?;
        Ok(removed > 0)
    }
}
