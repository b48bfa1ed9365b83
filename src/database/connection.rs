//! Construcción del backend de persistencia configurado

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use super::{FileRecordStore, MemoryRecordStore, RecordStore};
use crate::cache::{CacheConfig, RedisRecordStore};
use crate::config::StorageBackend;

/// Crear el almacén de registros según la configuración
pub async fn create_store(backend: &StorageBackend) -> Result<Arc<dyn RecordStore>> {
    let store: Arc<dyn RecordStore> = match backend {
        StorageBackend::Memory => Arc::new(MemoryRecordStore::new()),
        StorageBackend::File(dir) => Arc::new(
            FileRecordStore::new(dir)
                .await
                .with_context(|| format!("opening storage dir {}", dir.display()))?,
        ),
        StorageBackend::Redis(url) => Arc::new(
            RedisRecordStore::new(CacheConfig::with_url(url.clone()))
                .await
                .with_context(|| format!("connecting to {}", mask_redis_url(url)))?,
        ),
    };

    info!("🗄️ Backend de persistencia: {}", store.backend_name());
    Ok(store)
}

/// Función helper para enmascarar la contraseña de la URL en logs
pub(crate) fn mask_redis_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
            format!("{}***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
