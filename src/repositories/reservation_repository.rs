use std::sync::Arc;
use uuid::Uuid;

use crate::database::{RecordCollection, RecordStore};
use crate::models::reservation::Reservation;
use crate::utils::errors::{AppError, AppResult};

pub const RESERVATIONS_KEY: &str = "reservations";

#[derive(Clone)]
pub struct ReservationRepository {
    records: RecordCollection<Reservation>,
}

impl ReservationRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            records: RecordCollection::new(store, RESERVATIONS_KEY),
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.records.load().await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        Ok(self.find_all().await?.into_iter().find(|r| r.id == id))
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Reservation>> {
        let mut reservations = self.find_all().await?;
        reservations.retain(|r| r.user_id == user_id);
        Ok(reservations)
    }

    /// Agregar al final de la secuencia
    pub async fn insert(&self, reservation: &Reservation) -> AppResult<()> {
        let mut reservations = self.find_all().await?;
        reservations.push(reservation.clone());
        self.records.save(&reservations).await?;
        Ok(())
    }

    /// Reemplazar el registro con el mismo id, conservando su posición
    pub async fn update(&self, reservation: &Reservation) -> AppResult<()> {
        let mut reservations = self.find_all().await?;
        let slot = reservations
            .iter_mut()
            .find(|r| r.id == reservation.id)
            .ok_or_else(|| AppError::ReservationNotFound(reservation.id.to_string()))?;
        *slot = reservation.clone();
        self.records.save(&reservations).await?;
        Ok(())
    }
}
