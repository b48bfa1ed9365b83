use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::reservation_controller::{
    cancel_reservation, create_reservation, get_reservation, list_my_reservations,
    modify_reservation,
};
use crate::state::AppState;

pub fn create_reservation_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_reservation).get(list_my_reservations))
        .route("/:id", get(get_reservation).put(modify_reservation))
        .route("/:id/cancel", post(cancel_reservation))
}
