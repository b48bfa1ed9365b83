//! Rutas de la API
//!
//! Ensambla los routers por recurso y aplica las capas comunes
//! (identidad, trazas y CORS).

pub mod agency_routes;
pub mod auth_routes;
pub mod reservation_routes;
pub mod vehicle_routes;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::controllers::health_controller::health;
use crate::middleware::{cors_middleware, optional_auth_middleware};
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/profile", auth_routes::create_profile_router())
        .nest("/reservations", reservation_routes::create_reservation_router())
        .nest("/agency", agency_routes::create_agency_router())
        .layer(from_fn_with_state(state.clone(), optional_auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_middleware(&state.config.cors_origins))
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
