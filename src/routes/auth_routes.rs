use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::auth_controller::{get_profile, login, signup, update_profile};
use crate::state::AppState;

/// Configura las rutas de autenticación
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Perfil del usuario autenticado
pub fn create_profile_router() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(update_profile))
}
