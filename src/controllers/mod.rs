//! Controladores HTTP
//!
//! Handlers de axum: extraen la request, llaman al servicio y envuelven la
//! respuesta en `ApiResponse`.

pub mod agency_controller;
pub mod auth_controller;
pub mod health_controller;
pub mod reservation_controller;
pub mod vehicle_controller;
