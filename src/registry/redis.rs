use async_trait::async_trait;
use fred::pool::RedisPool;
use fred::prelude::*;
use fred::types::RedisKey;

use crate::prelude::*;
use crate::registry::Registry;

/// Shared external store, blobs expire with the session.
#[derive(Clone)]
pub struct RedisRegistry {
    redis: RedisPool,
    expire: Option<Expiration>,
}

impl RedisRegistry {
    #[instrument(skip_all, fields(pool_size = pool_size))]
    pub async fn connect(uri: &str, pool_size: usize, ttl: StdDuration) -> Result<Self> {
        let config = RedisConfig::from_url(uri).context("invalid Redis URI")?;
        let redis = RedisPool::new(config, pool_size)?;
        redis.connect(None);
        redis
            .wait_for_connect()
            .await
            .context("failed to connect to Redis")?;
        info!("connected to Redis");

        let ttl = i64::try_from(ttl.as_secs().max(1)).context("session TTL is too long")?;
        Ok(Self {
            redis,
            expire: Some(Expiration::EX(ttl)),
        })
    }

    #[inline]
    fn cache_key(key: &str) -> RedisKey {
        RedisKey::from(format!("linreg:{}", key))
    }
}

#[async_trait]
impl Registry for RedisRegistry {
    fn name(&self) -> &'static str {
        "redis"
    }

    #[instrument(level = "debug", skip_all, fields(key = key))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let blob = self
            .redis
            .get::<Option<Vec<u8>>, _>(Self::cache_key(key))
            .await?;
        debug!(is_hit = blob.is_some());
        Ok(blob)
    }

    #[instrument(level = "debug", skip_all, fields(key = key, size = blob.len()))]
    async fn put(&self, key: &str, blob: Vec<u8>) -> Result {
        let _: RedisValue = self
            .redis
            .set(Self::cache_key(key), blob.as_slice(), self.expire.clone(), None, false)
            .await?;
        Ok(())
    }
}
