//! Catálogo semilla de vehículos
//!
//! Se carga una sola vez al arrancar; `CATALOG_PATH` permite reemplazarlo
//! por un archivo JSON con el mismo formato.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::models::vehicle::{FuelType, Transmission, Vehicle, VehicleType};

#[allow(clippy::too_many_arguments)]
fn vehicle(
    id: &str,
    brand: &str,
    model: &str,
    year: i32,
    vehicle_type: VehicleType,
    seats: u8,
    transmission: Transmission,
    fuel: FuelType,
    price_per_day: i64,
    location: &str,
    rating: f32,
    features: &[&str],
    description: &str,
) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        year,
        vehicle_type,
        seats,
        transmission,
        fuel,
        price_per_day: Decimal::new(price_per_day, 0),
        image: format!("/images/vehicles/{}.jpg", id),
        available: true,
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        location: location.to_string(),
        rating,
    }
}

/// Catálogo incluido en el binario
pub fn seed_vehicles() -> Vec<Vehicle> {
    use FuelType::*;
    use Transmission::*;
    use VehicleType::*;

    let mut vehicles = vec![
        vehicle(
            "v1", "Volkswagen", "Golf", 2022, Hatchback, 5, Manual, Gasoline, 70, "Tunis", 4.6,
            &["Air conditioning", "Bluetooth", "Rear camera"],
            "Compact and economical, ideal for city driving.",
        ),
        vehicle(
            "v2", "Kia", "Sportage", 2023, Suv, 5, Automatic, Diesel, 120, "Sousse", 4.8,
            &["Air conditioning", "Cruise control", "Apple CarPlay", "Roof rails"],
            "Spacious SUV for family trips along the coast.",
        ),
        vehicle(
            "v3", "Peugeot", "508", 2022, Sedan, 5, Automatic, Diesel, 95, "Tunis", 4.5,
            &["Leather seats", "Navigation", "Lane assist"],
            "Comfortable sedan for business travel.",
        ),
        vehicle(
            "v4", "Renault", "Clio", 2021, Hatchback, 5, Manual, Gasoline, 55, "Monastir", 4.3,
            &["Air conditioning", "USB ports"],
            "Affordable runabout with low fuel consumption.",
        ),
        vehicle(
            "v5", "Mini", "Cooper Cabrio", 2022, Convertible, 4, Automatic, Gasoline, 150, "Hammamet", 4.7,
            &["Soft top", "Heated seats", "Bluetooth"],
            "Open-top fun for summer roads.",
        ),
        vehicle(
            "v6", "Hyundai", "Tucson", 2023, Suv, 5, Automatic, Hybrid, 130, "Djerba", 4.6,
            &["Hybrid engine", "Panoramic roof", "Navigation"],
            "Efficient hybrid SUV with plenty of luggage space.",
        ),
        vehicle(
            "v7", "Ford", "Mustang", 2021, Sports, 4, Automatic, Gasoline, 180, "Tunis", 4.9,
            &["V8 engine", "Sport mode", "Premium audio"],
            "Iconic muscle car for a memorable weekend.",
        ),
        vehicle(
            "v8", "Citroën", "SpaceTourer", 2022, Minivan, 8, Manual, Diesel, 140, "Sfax", 4.4,
            &["8 seats", "Sliding doors", "Air conditioning"],
            "Eight-seat minivan for groups and large families.",
        ),
    ];

    // Un vehículo en mantenimiento para que el catálogo muestre ambos estados
    if let Some(v) = vehicles.iter_mut().find(|v| v.id == "v4") {
        v.available = false;
    }
    vehicles
}

/// Cargar el catálogo desde un JSON o usar la semilla
pub async fn load_catalog(path: Option<&Path>) -> Result<Vec<Vehicle>> {
    let vehicles = match path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading catalog {}", path.display()))?;
            let vehicles: Vec<Vehicle> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing catalog {}", path.display()))?;
            info!("🚗 Catálogo cargado desde {} ({} vehículos)", path.display(), vehicles.len());
            vehicles
        }
        None => {
            let vehicles = seed_vehicles();
            info!("🚗 Catálogo semilla cargado ({} vehículos)", vehicles.len());
            vehicles
        }
    };

    let mut seen = HashSet::new();
    if let Some(dup) = vehicles.iter().find(|v| !seen.insert(v.id.as_str())) {
        anyhow::bail!("duplicate vehicle id '{}' in catalog", dup.id);
    }

    Ok(vehicles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let vehicles = seed_vehicles();
        let ids: HashSet<_> = vehicles.iter().map(|v| v.id.clone()).collect();
        assert_eq!(ids.len(), vehicles.len());
    }

    #[test]
    fn test_seed_ratings_in_range() {
        assert!(seed_vehicles()
            .iter()
            .all(|v| (0.0..=5.0).contains(&v.rating) && v.price_per_day > Decimal::ZERO));
    }

    #[tokio::test]
    async fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let subset: Vec<Vehicle> = seed_vehicles().into_iter().take(2).collect();
        std::fs::write(&path, serde_json::to_string(&subset).unwrap()).unwrap();

        let loaded = load_catalog(Some(&path)).await.unwrap();
        assert_eq!(loaded, subset);
    }

    #[tokio::test]
    async fn test_load_catalog_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let first = seed_vehicles().remove(0);
        std::fs::write(&path, serde_json::to_string(&vec![first.clone(), first]).unwrap()).unwrap();

        assert!(load_catalog(Some(&path)).await.is_err());
    }
}
