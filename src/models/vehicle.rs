//! Modelo de Vehicle
//!
//! Registro inmutable del catálogo y sus enumeraciones. Sólo la
//! disponibilidad cambia, y únicamente en memoria.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Tipo de carrocería
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "SUV")]
    Suv,
    Sedan,
    Hatchback,
    Convertible,
    Sports,
    Minivan,
}

impl VehicleType {
    pub const ALL: [VehicleType; 6] = [
        VehicleType::Suv,
        VehicleType::Sedan,
        VehicleType::Hatchback,
        VehicleType::Convertible,
        VehicleType::Sports,
        VehicleType::Minivan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Suv => "SUV",
            VehicleType::Sedan => "Sedan",
            VehicleType::Hatchback => "Hatchback",
            VehicleType::Convertible => "Convertible",
            VehicleType::Sports => "Sports",
            VehicleType::Minivan => "Minivan",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = String;

    /// Acepta el nombre sin distinguir mayúsculas ("suv", "SUV", "sedan")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown vehicle type '{}'", s))
    }
}

/// Tipo de transmisión
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transmission {
    Automatic,
    Manual,
}

impl Transmission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transmission::Automatic => "Automatic",
            Transmission::Manual => "Manual",
        }
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transmission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automatic" => Ok(Transmission::Automatic),
            "manual" => Ok(Transmission::Manual),
            _ => Err(format!("unknown transmission '{}'", s)),
        }
    }
}

/// Tipo de combustible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

/// Vehículo del catálogo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub seats: u8,
    pub transmission: Transmission,
    pub fuel: FuelType,
    pub price_per_day: Decimal,
    pub image: String,
    pub available: bool,
    pub description: String,
    pub features: Vec<String>,
    pub location: String,
    pub rating: f32,
}

impl Vehicle {
    /// Nombre para mostrar, desnormalizado en las reservas
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// Request para agregar un vehículo a la flota de la agencia
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewVehicle {
    #[validate(length(min = 1, max = 50))]
    pub id: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1990, max = 2035))]
    pub year: i32,

    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,

    #[validate(range(min = 1, max = 9))]
    pub seats: u8,

    pub transmission: Transmission,
    pub fuel: FuelType,
    pub price_per_day: Decimal,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub features: Vec<String>,

    #[validate(length(min = 2, max = 100))]
    pub location: String,
}

impl NewVehicle {
    /// Construir el vehículo, disponible y sin valoraciones
    pub fn into_vehicle(self, id: String) -> Vehicle {
        Vehicle {
            id,
            brand: self.brand,
            model: self.model,
            year: self.year,
            vehicle_type: self.vehicle_type,
            seats: self.seats,
            transmission: self.transmission,
            fuel: self.fuel,
            price_per_day: self.price_per_day,
            image: self.image,
            available: true,
            description: self.description,
            features: self.features,
            location: self.location,
            rating: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_wire_names() {
        assert_eq!(serde_json::to_string(&VehicleType::Suv).unwrap(), "\"SUV\"");
        assert_eq!(serde_json::to_string(&VehicleType::Minivan).unwrap(), "\"Minivan\"");
        let parsed: VehicleType = serde_json::from_str("\"SUV\"").unwrap();
        assert_eq!(parsed, VehicleType::Suv);
    }

    #[test]
    fn test_vehicle_type_from_str_is_case_insensitive() {
        assert_eq!("suv".parse::<VehicleType>().unwrap(), VehicleType::Suv);
        assert_eq!("Sedan".parse::<VehicleType>().unwrap(), VehicleType::Sedan);
        assert!("truck".parse::<VehicleType>().is_err());
    }

    #[test]
    fn test_transmission_from_str() {
        assert_eq!("MANUAL".parse::<Transmission>().unwrap(), Transmission::Manual);
        assert!("cvt".parse::<Transmission>().is_err());
    }
}
