use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::review::RatingSummary;
use crate::models::vehicle::Vehicle;
use crate::services::catalog_filter::{CatalogFilter, TransmissionFilter, TypeFilter};
use crate::utils::errors::{AppError, AppResult};

// Query string del listado: ?type=&transmission=&min_price=&max_price=&search=
#[derive(Debug, Default, Deserialize)]
pub struct VehicleQuery {
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub transmission: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
}

impl VehicleQuery {
    /// Parámetros ausentes o vacíos no restringen el resultado
    pub fn into_filter(self) -> AppResult<CatalogFilter> {
        let mut filter = CatalogFilter::default();

        if let Some(value) = self.vehicle_type {
            filter.vehicle_type = value.parse::<TypeFilter>().map_err(AppError::BadRequest)?;
        }
        if let Some(value) = self.transmission {
            filter.transmission = value.parse::<TransmissionFilter>().map_err(AppError::BadRequest)?;
        }
        if let Some(min) = parse_price("min_price", self.min_price)? {
            filter.min_price = min;
        }
        filter.max_price = parse_price("max_price", self.max_price)?;
        filter.search_term = self.search.unwrap_or_default();

        Ok(filter)
    }
}

fn parse_price(name: &str, value: Option<String>) -> AppResult<Option<Decimal>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Decimal::from_str(raw)
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{} must be a number (got '{}')", name, raw))),
    }
}

// Detalle de vehículo con resumen de reseñas
#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleDetailResponse {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub reviews: RatingSummary,
}

// Request para cambiar la disponibilidad
#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub available: bool,
}
