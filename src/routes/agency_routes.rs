use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::controllers::agency_controller::{
    add_vehicle, list_all_reservations, remove_vehicle, set_vehicle_availability,
    update_reservation_status,
};
use crate::state::AppState;

pub fn create_agency_router() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(list_all_reservations))
        .route("/reservations/:id/status", put(update_reservation_status))
        .route("/vehicles", post(add_vehicle))
        .route("/vehicles/:id/availability", put(set_vehicle_availability))
        .route("/vehicles/:id", delete(remove_vehicle))
}
