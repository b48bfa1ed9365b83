//! Interfaz de persistencia clave → secuencia de registros
//!
//! Cada clave guarda un array JSON de registros. Los backends sólo mueven
//! texto; la (de)serialización tipada vive en `RecordCollection`.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errores del backend de persistencia
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Corrupt data under key '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Almacén clave-valor inyectable
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Nombre del backend para logs
    fn backend_name(&self) -> &'static str;

    /// Leer el valor crudo de una clave; `None` si nunca se escribió
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Reemplazar el valor completo de una clave
    async fn put(&self, key: &str, value: String) -> StoreResult<()>;
}

/// Vista tipada de una clave del almacén
pub struct RecordCollection<T> {
    store: Arc<dyn RecordStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for RecordCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T> RecordCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn RecordStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Cargar todos los registros; una clave vacía equivale a una lista vacía
    pub async fn load(&self) -> StoreResult<Vec<T>> {
        let Some(raw) = self.store.get(self.key).await? else {
            debug!("📭 Clave '{}' vacía en {}", self.key, self.store.backend_name());
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            key: self.key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Guardar la secuencia completa
    pub async fn save(&self, records: &[T]) -> StoreResult<()> {
        let raw = serde_json::to_string(records)?;
        debug!(
            "💾 Guardando {} registros en '{}' ({})",
            records.len(),
            self.key,
            self.store.backend_name()
        );
        self.store.put(self.key, raw).await
    }
}
