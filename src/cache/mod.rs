//! Cache
//!
//! Backend Redis para el almacén de registros.

pub mod cache_config;
pub mod redis_client;

pub use cache_config::CacheConfig;
pub use redis_client::RedisRecordStore;
