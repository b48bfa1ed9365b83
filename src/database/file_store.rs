//! Backend basado en archivos: un `<clave>.json` por clave
//!
//! Es el equivalente más cercano al localStorage del navegador.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use super::record_store::{RecordStore, StoreError, StoreResult};

pub struct FileRecordStore {
    base_dir: PathBuf,
}

impl FileRecordStore {
    /// Crear el backend, asegurando que el directorio exista
    pub async fn new(base_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).await?;
        info!("📁 Almacén de archivos en {}", base_dir.display());
        Ok(Self { base_dir })
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::Corrupt {
                key: key.to_string(),
                reason: "key must be alphanumeric".to_string(),
            });
        }
        Ok(self.base_dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: String) -> StoreResult<()> {
        let path = self.path_for(key)?;
        // Escribir a un temporal y renombrar para no dejar archivos a medias
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        debug!("💾 Escrito {}", path.display());
        Ok(())
    }
}
