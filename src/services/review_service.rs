//! Servicio de reseñas

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::database::RecordStore;
use crate::models::auth::{require_identity, Identity};
use crate::models::review::{RatingSummary, Review};
use crate::repositories::ReviewRepository;
use crate::services::catalog_service::CatalogService;
use crate::utils::errors::{field_error, validation_error, AppResult};
use crate::utils::validation::{validate_not_empty, validate_range};

pub const MAX_COMMENT_LENGTH: usize = 1000;

pub struct ReviewService {
    repository: ReviewRepository,
    catalog: Arc<CatalogService>,
    write_lock: Mutex<()>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn RecordStore>, catalog: Arc<CatalogService>) -> Self {
        Self {
            repository: ReviewRepository::new(store),
            catalog,
            write_lock: Mutex::new(()),
        }
    }

    /// Publicar una reseña sobre un vehículo existente
    pub async fn submit(
        &self,
        identity: Option<&Identity>,
        vehicle_id: &str,
        rating: u8,
        comment: &str,
    ) -> AppResult<Review> {
        let identity = require_identity(identity)?;
        let vehicle = self.catalog.get(vehicle_id).await?;

        validate_range(rating, 1, 5).map_err(|e| field_error("rating", e))?;
        validate_not_empty(comment).map_err(|e| field_error("comment", e))?;
        let comment = comment.trim();
        if comment.chars().count() > MAX_COMMENT_LENGTH {
            return Err(validation_error("comment", "comment cannot exceed 1000 characters"));
        }

        let review = Review {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id,
            user_id: identity.user_id,
            user_name: identity.name.clone(),
            rating,
            comment: comment.to_string(),
            created_at: Utc::now(),
        };

        {
            let _guard = self.write_lock.lock().await;
            self.repository.insert(&review).await?;
        }

        info!("⭐ Reseña {} ({} estrellas) para {}", review.id, rating, review.vehicle_id);
        Ok(review)
    }

    /// Reseñas de un vehículo, la más reciente primero
    pub async fn list_for_vehicle(&self, vehicle_id: &str) -> AppResult<Vec<Review>> {
        self.catalog.get(vehicle_id).await?;
        let mut reviews = self.repository.find_by_vehicle(vehicle_id).await?;
        reviews.reverse();
        Ok(reviews)
    }

    pub async fn rating_summary(&self, vehicle_id: &str) -> AppResult<RatingSummary> {
        let reviews = self.repository.find_by_vehicle(vehicle_id).await?;
        Ok(RatingSummary::from_reviews(&reviews))
    }
}
