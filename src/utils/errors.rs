//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::database::StoreError;
use crate::models::reservation::ReservationStatus;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Incomplete profile: missing {}", .0.join(", "))]
    IncompleteProfile(Vec<String>),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Vehicle '{0}' is not available")]
    VehicleUnavailable(String),

    #[error("Reservation '{0}' not found")]
    ReservationNotFound(String),

    #[error("Reservation belongs to another user")]
    NotOwner,

    #[error("Cannot move reservation from {from} to {to}")]
    InvalidStatusTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Advertencias no fatales de una reserva
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingWarning {
    /// El código de descuento no es válido; la reserva sigue sin descuento
    InvalidDiscountCode(String),
}

impl BookingWarning {
    pub fn message(&self) -> String {
        match self {
            BookingWarning::InvalidDiscountCode(code) => {
                format!("Discount code '{}' is not valid; no discount applied", code)
            }
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: &'static str,
}

impl AppError {
    /// Código estable expuesto a los clientes
    pub fn code(&self) -> &'static str {
        match self {
            AppError::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            AppError::IncompleteProfile(_) => "INCOMPLETE_PROFILE",
            AppError::InvalidDateRange(_) => "INVALID_DATE_RANGE",
            AppError::VehicleUnavailable(_) => "VEHICLE_UNAVAILABLE",
            AppError::ReservationNotFound(_) => "RESERVATION_NOT_FOUND",
            AppError::NotOwner => "NOT_OWNER",
            AppError::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Jwt(_) => "JWT_ERROR",
            AppError::Hash(_) => "HASH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthenticationRequired
            | AppError::Unauthorized(_)
            | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::NotOwner | AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ReservationNotFound(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::VehicleUnavailable(_)
            | AppError::InvalidStatusTransition { .. }
            | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::IncompleteProfile(_)
            | AppError::InvalidDateRange(_)
            | AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) | AppError::Hash(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn title(&self) -> &'static str {
        match self.status_code() {
            StatusCode::UNAUTHORIZED => "Unauthorized",
            StatusCode::FORBIDDEN => "Forbidden",
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::CONFLICT => "Conflict",
            StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable Entity",
            StatusCode::BAD_REQUEST => "Bad Request",
            _ => "Internal Server Error",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::IncompleteProfile(missing) => Some(json!({ "missing_fields": missing })),
            AppError::Validation(e) => Some(json!(e)),
            AppError::InvalidStatusTransition { from, to } => {
                Some(json!({ "from": from, "to": to }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Los errores internos no exponen detalles al cliente
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("❌ {}", self);
            "An unexpected error occurred".to_string()
        } else {
            warn!("⚠️ {} ({})", self, self.code());
            self.to_string()
        };

        let body = ErrorResponse {
            error: self.title().to_string(),
            message,
            details: self.details(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Asociar un `ValidationError` suelto a un campo
pub fn field_error(field: &'static str, error: validator::ValidationError) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("Cannot {}: {}", operation, reason))
}
