//! Módulo de persistencia
//!
//! Almacén clave → secuencia de registros con backends en memoria,
//! archivos y Redis, más el catálogo semilla.

pub mod connection;
pub mod file_store;
pub mod memory_store;
pub mod record_store;
pub mod seed;

pub use connection::create_store;
pub use file_store::FileRecordStore;
pub use memory_store::MemoryRecordStore;
pub use record_store::{RecordCollection, RecordStore, StoreError, StoreResult};
