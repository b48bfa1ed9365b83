//! Filtro del catálogo
//!
//! Reduce la lista fija de vehículos por tipo, transmisión, rango de precio
//! y búsqueda de texto. El resultado conserva el orden del catálogo.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::vehicle::{Transmission, Vehicle, VehicleType};

/// Filtro por tipo de carrocería: `all` o un tipo concreto
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeFilter {
    #[default]
    All,
    Only(VehicleType),
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" | "all_types" => Ok(TypeFilter::All),
            other => other.parse().map(TypeFilter::Only),
        }
    }
}

impl TryFrom<String> for TypeFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeFilter> for String {
    fn from(filter: TypeFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Only(t) => f.write_str(t.as_str()),
        }
    }
}

/// Filtro por transmisión: `any` o una concreta
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TransmissionFilter {
    #[default]
    Any,
    Only(Transmission),
}

impl FromStr for TransmissionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "any" | "any_transmission" => Ok(TransmissionFilter::Any),
            other => other.parse().map(TransmissionFilter::Only),
        }
    }
}

impl TryFrom<String> for TransmissionFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TransmissionFilter> for String {
    fn from(filter: TransmissionFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for TransmissionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransmissionFilter::Any => f.write_str("any"),
            TransmissionFilter::Only(t) => f.write_str(t.as_str()),
        }
    }
}

/// Especificación del filtro; `Default` deja pasar todo el catálogo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFilter {
    #[serde(rename = "type")]
    pub vehicle_type: TypeFilter,
    pub transmission: TransmissionFilter,
    pub min_price: Decimal,
    /// `None` = sin límite superior
    pub max_price: Option<Decimal>,
    pub search_term: String,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            vehicle_type: TypeFilter::All,
            transmission: TransmissionFilter::Any,
            min_price: Decimal::ZERO,
            max_price: None,
            search_term: String::new(),
        }
    }
}

impl CatalogFilter {
    /// Evaluar todos los predicados sobre un vehículo
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.matches_type(vehicle)
            && self.matches_transmission(vehicle)
            && self.matches_price(vehicle)
            && self.matches_search(vehicle)
    }

    fn matches_type(&self, vehicle: &Vehicle) -> bool {
        match self.vehicle_type {
            TypeFilter::All => true,
            TypeFilter::Only(t) => vehicle.vehicle_type == t,
        }
    }

    fn matches_transmission(&self, vehicle: &Vehicle) -> bool {
        match self.transmission {
            TransmissionFilter::Any => true,
            TransmissionFilter::Only(t) => vehicle.transmission == t,
        }
    }

    // min > max no se corrige: simplemente no hay coincidencias
    fn matches_price(&self, vehicle: &Vehicle) -> bool {
        vehicle.price_per_day >= self.min_price
            && self.max_price.map_or(true, |max| vehicle.price_per_day <= max)
    }

    fn matches_search(&self, vehicle: &Vehicle) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let term = self.search_term.to_lowercase();
        [&vehicle.brand, &vehicle.model, &vehicle.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Aplicar el filtro preservando el orden original
pub fn filter_vehicles(catalog: &[Vehicle], filter: &CatalogFilter) -> Vec<Vehicle> {
    catalog
        .iter()
        .filter(|vehicle| filter.matches(vehicle))
        .cloned()
        .collect()
}
