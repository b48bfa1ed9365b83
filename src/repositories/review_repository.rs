use std::sync::Arc;

use crate::database::{RecordCollection, RecordStore};
use crate::models::review::Review;
use crate::utils::errors::AppResult;

pub const REVIEWS_KEY: &str = "reviews";

#[derive(Clone)]
pub struct ReviewRepository {
    records: RecordCollection<Review>,
}

impl ReviewRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            records: RecordCollection::new(store, REVIEWS_KEY),
        }
    }

    /// Reseñas de un vehículo en orden de inserción
    pub async fn find_by_vehicle(&self, vehicle_id: &str) -> AppResult<Vec<Review>> {
        let mut reviews = self.records.load().await?;
        reviews.retain(|r| r.vehicle_id == vehicle_id);
        Ok(reviews)
    }

    pub async fn insert(&self, review: &Review) -> AppResult<()> {
        let mut reviews = self.records.load().await?;
        reviews.push(review.clone());
        self.records.save(&reviews).await?;
        Ok(())
    }
}
