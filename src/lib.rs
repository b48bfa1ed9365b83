//! CarFlow: catálogo de vehículos y reservas de alquiler
//!
//! Biblioteca con el filtro del catálogo, el cálculo de precios, los
//! servicios de reservas, reseñas e identidad, y la API HTTP que los expone.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
