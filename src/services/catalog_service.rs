//! Servicio de catálogo
//!
//! Mantiene la flota en memoria. Los cambios de la agencia (disponibilidad,
//! altas y bajas) duran lo que dura el proceso.

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::auth::{require_agency, Identity};
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::services::catalog_filter::{filter_vehicles, CatalogFilter};
use crate::utils::errors::{conflict_error, field_error, not_found_error, AppResult};
use crate::utils::validation::validate_positive;

pub struct CatalogService {
    vehicles: RwLock<Vec<Vehicle>>,
}

impl CatalogService {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        info!("🚗 Catálogo cargado con {} vehículos", vehicles.len());
        Self {
            vehicles: RwLock::new(vehicles),
        }
    }

    pub async fn list(&self) -> Vec<Vehicle> {
        self.vehicles.read().await.clone()
    }

    pub async fn search(&self, filter: &CatalogFilter) -> Vec<Vehicle> {
        let vehicles = self.vehicles.read().await;
        filter_vehicles(&vehicles, filter)
    }

    pub async fn get(&self, id: &str) -> AppResult<Vehicle> {
        self.vehicles
            .read()
            .await
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    /// Marcar un vehículo como disponible o no (sólo agencia)
    pub async fn set_availability(
        &self,
        identity: Option<&Identity>,
        id: &str,
        available: bool,
    ) -> AppResult<Vehicle> {
        let agent = require_agency(identity, "change vehicle availability")?;

        let mut vehicles = self.vehicles.write().await;
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehicle", id))?;
        vehicle.available = available;

        info!(
            "🔧 {} marcó el vehículo {} como {}",
            agent.name,
            id,
            if available { "disponible" } else { "no disponible" }
        );
        Ok(vehicle.clone())
    }

    /// Agregar un vehículo a la flota (sólo agencia)
    pub async fn add_vehicle(
        &self,
        identity: Option<&Identity>,
        request: NewVehicle,
    ) -> AppResult<Vehicle> {
        let agent = require_agency(identity, "add vehicles")?;
        request.validate()?;
        validate_positive(request.price_per_day).map_err(|e| field_error("price_per_day", e))?;

        let id = request
            .id
            .clone()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut vehicles = self.vehicles.write().await;
        if vehicles.iter().any(|v| v.id == id) {
            return Err(conflict_error("Vehicle", "id", &id));
        }

        let vehicle = request.into_vehicle(id);
        vehicles.push(vehicle.clone());

        info!("✅ {} agregó {} ({})", agent.name, vehicle.display_name(), vehicle.id);
        Ok(vehicle)
    }

    /// Quitar un vehículo de la flota (sólo agencia)
    pub async fn remove_vehicle(&self, identity: Option<&Identity>, id: &str) -> AppResult<Vehicle> {
        let agent = require_agency(identity, "remove vehicles")?;

        let mut vehicles = self.vehicles.write().await;
        let position = vehicles
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehicle", id))?;
        let removed = vehicles.remove(position);

        info!("🗑️ {} retiró {} ({})", agent.name, removed.display_name(), removed.id);
        Ok(removed)
    }
}
