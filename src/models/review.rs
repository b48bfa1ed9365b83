//! Modelo de Review

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reseña de un vehículo (sólo se crea, nunca se modifica)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub vehicle_id: String,
    pub user_id: Uuid,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Resumen de valoraciones de un vehículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub count: usize,
    pub average: Option<f32>,
}

impl RatingSummary {
    pub fn from_reviews<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> Self {
        let (count, sum) = reviews
            .into_iter()
            .fold((0usize, 0u32), |(n, s), r| (n + 1, s + r.rating as u32));

        Self {
            count,
            average: (count > 0).then(|| sum as f32 / count as f32),
        }
    }
}
