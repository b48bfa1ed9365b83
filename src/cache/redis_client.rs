use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use tracing::{debug, error, info};

use super::CacheConfig;
use crate::database::connection::mask_redis_url;
use crate::database::{RecordStore, StoreResult};

/// Backend Redis con connection manager
#[derive(Clone)]
pub struct RedisRecordStore {
    manager: ConnectionManager,
    config: CacheConfig,
}

impl RedisRecordStore {
    /// Crear nuevo cliente Redis y verificar la conexión
    pub async fn new(config: CacheConfig) -> StoreResult<Self> {
        info!("🔗 Conectando a Redis: {}", mask_redis_url(&config.redis_url));

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager, config })
    }

    /// Generar clave con prefijo
    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.config.key_prefix, key)
    }
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    fn backend_name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.manager.clone();
        let full_key = self.make_key(key);

        let value: Option<String> = conn.get(&full_key).await?;
        match &value {
            Some(_) => debug!("📥 Redis HIT para clave: {}", full_key),
            None => debug!("❌ Redis MISS para clave: {}", full_key),
        }
        Ok(value)
    }

    async fn put(&self, key: &str, value: String) -> StoreResult<()> {
        let mut conn = self.manager.clone();
        let full_key = self.make_key(key);

        conn.set::<_, _, ()>(&full_key, value).await.map_err(|e| {
            error!("❌ Error guardando clave {}: {}", full_key, e);
            e
        })?;

        debug!("💾 Redis SET para clave: {}", full_key);
        Ok(())
    }
}
