//! Configuración de precios de reservas

use anyhow::{bail, Result};
use rust_decimal::Decimal;

use crate::models::reservation::ReservationStatus;

/// Código de descuento único y estado inicial de las reservas
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub discount_code: String,
    /// Porcentaje plano aplicado al subtotal (0-100)
    pub discount_percent: Decimal,
    pub initial_status: ReservationStatus,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            discount_code: "CARFLOW10".to_string(),
            discount_percent: Decimal::TEN,
            initial_status: ReservationStatus::Pending,
        }
    }
}

impl PricingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.discount_code.trim().is_empty() {
            bail!("DISCOUNT_CODE cannot be empty");
        }
        if self.discount_percent < Decimal::ZERO || self.discount_percent > Decimal::ONE_HUNDRED {
            bail!(
                "DISCOUNT_PERCENT must be between 0 and 100 (got {})",
                self.discount_percent
            );
        }
        if !matches!(
            self.initial_status,
            ReservationStatus::Pending | ReservationStatus::Confirmed
        ) {
            bail!(
                "INITIAL_RESERVATION_STATUS must be pending or confirmed (got {})",
                self.initial_status
            );
        }
        Ok(())
    }
}
