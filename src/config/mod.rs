//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de entorno, persistencia y precios.

pub mod environment;
pub mod pricing;

pub use environment::*;
pub use pricing::PricingConfig;
