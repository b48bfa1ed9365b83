//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos persistidos o
//! cargados desde el catálogo.

pub mod auth;
pub mod reservation;
pub mod review;
pub mod user;
pub mod vehicle;
