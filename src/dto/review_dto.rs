use serde::{Deserialize, Serialize};

use crate::models::review::{RatingSummary, Review};

// Request para publicar una reseña
#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    pub rating: u8,
    pub comment: String,
}

// Listado de reseñas de un vehículo
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewListResponse {
    pub summary: RatingSummary,
    pub reviews: Vec<Review>,
}
