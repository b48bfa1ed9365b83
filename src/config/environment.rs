//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::pricing::PricingConfig;

const DEV_JWT_SECRET: &str = "carflow-development-secret";

/// Backend de persistencia seleccionado
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File(PathBuf),
    Redis(String),
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub log_level: tracing::Level,
    pub storage: StorageBackend,
    pub catalog_path: Option<PathBuf>,
    pub pricing: PricingConfig,
}

impl Default for EnvironmentConfig {
    /// Valores de desarrollo, sin leer el entorno
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration: 86_400,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cors_origins: Vec::new(),
            log_level: tracing::Level::INFO,
            storage: StorageBackend::Memory,
            catalog_path: None,
            pricing: PricingConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = var_or("ENVIRONMENT", &defaults.environment);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "production" => bail!("JWT_SECRET must be set in production"),
            _ => defaults.jwt_secret.clone(),
        };

        let storage = match var_or("STORAGE_BACKEND", "memory").to_lowercase().as_str() {
            "memory" => StorageBackend::Memory,
            "file" => StorageBackend::File(PathBuf::from(var_or("STORAGE_DIR", "./data"))),
            "redis" => StorageBackend::Redis(var_or("REDIS_URL", "redis://localhost:6379")),
            other => bail!("STORAGE_BACKEND must be memory, file or redis (got '{}')", other),
        };

        let pricing = PricingConfig {
            discount_code: var_or("DISCOUNT_CODE", &defaults.pricing.discount_code),
            discount_percent: parse_var("DISCOUNT_PERCENT", defaults.pricing.discount_percent)?,
            initial_status: parse_var("INITIAL_RESERVATION_STATUS", defaults.pricing.initial_status)?,
        };
        pricing.validate()?;

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            host: var_or("HOST", &defaults.host),
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?,
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_level: parse_var("LOG_LEVEL", defaults.log_level)?,
            storage,
            catalog_path: env::var("CATALOG_PATH").ok().map(PathBuf::from),
            pricing,
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("{} has an invalid value '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}
