//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::database::RecordStore;
use crate::models::vehicle::Vehicle;
use crate::services::{AuthService, CatalogService, ReservationService, ReviewService};
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub catalog: Arc<CatalogService>,
    pub reservations: Arc<ReservationService>,
    pub reviews: Arc<ReviewService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Arc<dyn RecordStore>, vehicles: Vec<Vehicle>) -> Self {
        let catalog = Arc::new(CatalogService::new(vehicles));
        let reservations = Arc::new(ReservationService::new(
            store.clone(),
            catalog.clone(),
            &config.pricing,
        ));
        let reviews = Arc::new(ReviewService::new(store.clone(), catalog.clone()));
        let auth = Arc::new(AuthService::new(
            store,
            JwtConfig::from(&config),
            config.bcrypt_cost,
        ));

        Self {
            config: Arc::new(config),
            catalog,
            reservations,
            reviews,
            auth,
        }
    }
}
