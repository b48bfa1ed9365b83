use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::vehicle_controller::{
    get_vehicle, list_reviews, list_vehicles, quote, submit_review,
};
use crate::state::AppState;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/quote", post(quote))
        .route("/:id/reviews", get(list_reviews).post(submit_review))
}
