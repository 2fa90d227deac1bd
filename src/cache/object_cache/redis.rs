//! Backend de cache Redis
//!
//! Falhas de conexão ou de comando nunca derrubam a requisição: toda operação
//! degrada para `ExistsButNoValue` (tratado como miss pelos chamadores).

use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

pub struct RedisObjectCache {
    client: redis::Client,
    key_prefix: String,
    default_ttl: u64,
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        let client = redis::Client::open(redis_config.url.clone())
            .map_err(|e| format!("Failed to create Redis client: {e}"))?;

        // PING na subida; se o servidor não responde, o startup cai para o moka
        let mut conn = client
            .get_connection()
            .map_err(|e| format!("Redis unreachable at {}: {e}", redis_config.url))?;
        redis::cmd("PING")
            .query::<String>(&mut conn)
            .map_err(|e| format!("Redis PING failed ({}): {e}", redis_config.url))?;

        debug!(
            "Redis cache created: prefix '{}', default TTL {}s",
            redis_config.key_prefix, config.cache.default_ttl
        );

        Ok(Self {
            client,
            key_prefix: redis_config.key_prefix.clone(),
            default_ttl: config.cache.default_ttl,
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("No Redis connection available: {}", e);
                return CacheResult::ExistsButNoValue;
            }
        };

        match conn.get::<_, Option<String>>(self.prefixed(key)).await {
            Ok(Some(raw)) => CacheResult::Found(raw),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("Redis GET for key '{}' failed: {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("No Redis connection available: {}", e);
                return;
            }
        };

        // ttl = 0 usa o TTL padrão da configuração
        let effective_ttl = if ttl == 0 { self.default_ttl } else { ttl };

        if let Err(e) = conn
            .set_ex::<String, String, ()>(self.prefixed(&key), value, effective_ttl)
            .await
        {
            error!("Redis SETEX for key '{}' failed: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let mut conn = match self.connection().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("No Redis connection available: {}", e);
                return;
            }
        };

        if let Err(e) = conn.del::<String, i32>(self.prefixed(key)).await {
            error!("Redis DEL for key '{}' failed: {}", key, e);
        }
    }

    async fn invalidate_all(&self) {
        // FLUSHDB apagaria chaves de outros usos do mesmo banco
        warn!("invalidate_all is not supported by the Redis backend");
    }
}
