//! Middleware del sistema
//!
//! Este módulo contiene el middleware de autenticación y CORS.

pub mod auth;
pub mod cors;

pub use auth::{optional_auth_middleware, CurrentUser};
pub use cors::cors_middleware;
