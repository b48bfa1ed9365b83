//! DTOs de la API HTTP

pub mod auth_dto;
pub mod common_dto;
pub mod reservation_dto;
pub mod review_dto;
pub mod vehicle_dto;

pub use common_dto::ApiResponse;
