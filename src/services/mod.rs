//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: filtro del
//! catálogo, cálculo de precios, reservas, reseñas e identidad.

pub mod auth_service;
pub mod catalog_filter;
pub mod catalog_service;
pub mod pricing;
pub mod reservation_service;
pub mod review_service;

pub use auth_service::AuthService;
pub use catalog_filter::{filter_vehicles, CatalogFilter, TransmissionFilter, TypeFilter};
pub use catalog_service::CatalogService;
pub use reservation_service::{
    BookingOutcome, CreateReservation, ModifyReservation, PricePreview, ReservationService,
};
pub use review_service::ReviewService;
