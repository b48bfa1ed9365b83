use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeSet;

use crate::models::reservation::{AddOn, ReservationStatus};
use crate::services::reservation_service::{CreateReservation, ModifyReservation};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::parse_instant;

// Request para crear una reserva; fechas `YYYY-MM-DD` o RFC3339
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub vehicle_id: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub add_ons: BTreeSet<AddOn>,
    pub discount_code: Option<String>,
}

impl CreateReservationRequest {
    pub fn into_command(self) -> AppResult<CreateReservation> {
        Ok(CreateReservation {
            vehicle_id: self.vehicle_id,
            start_date: parse_date("start date", self.start_date)?,
            end_date: parse_date("end date", self.end_date)?,
            add_ons: self.add_ons,
            discount_code: self.discount_code,
        })
    }
}

// Request de vista previa de precio
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub add_ons: BTreeSet<AddOn>,
    pub discount_code: Option<String>,
}

impl QuoteRequest {
    pub fn dates(&self) -> AppResult<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        Ok((
            parse_date("start date", self.start_date.clone())?,
            parse_date("end date", self.end_date.clone())?,
        ))
    }
}

// Request para modificar una reserva
#[derive(Debug, Default, Deserialize)]
pub struct ModifyReservationRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub add_ons: Option<BTreeSet<AddOn>>,
}

impl ModifyReservationRequest {
    pub fn into_command(self) -> AppResult<ModifyReservation> {
        Ok(ModifyReservation {
            start_date: parse_date("start date", self.start_date)?,
            end_date: parse_date("end date", self.end_date)?,
            add_ons: self.add_ons,
        })
    }
}

// Request de la agencia para cambiar el estado
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ReservationStatus,
}

/// Un valor vacío cuenta como ausente
fn parse_date(field: &str, value: Option<String>) -> AppResult<Option<DateTime<Utc>>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_instant(raw)
            .map(Some)
            .map_err(|_| AppError::InvalidDateRange(format!("invalid {} '{}'", field, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_plain_dates_become_midnight_utc() {
        let request: CreateReservationRequest = serde_json::from_str(
            r#"{"vehicle_id": "v1", "start_date": "2024-01-01", "end_date": "2024-01-04T10:00:00Z", "add_ons": ["insurance", "gps"]}"#,
        )
        .unwrap();
        let command = request.into_command().unwrap();

        assert_eq!(command.start_date, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert_eq!(command.end_date, Some(Utc.with_ymd_and_hms(2024, 1, 4, 10, 0, 0).unwrap()));
        assert!(command.add_ons.contains(&AddOn::Gps));
        assert_eq!(command.discount_code, None);
    }

    #[test]
    fn test_blank_date_is_missing_and_garbage_is_invalid() {
        let command = ModifyReservationRequest {
            start_date: Some("  ".to_string()),
            ..Default::default()
        }
        .into_command()
        .unwrap();
        assert_eq!(command.start_date, None);

        let garbage = ModifyReservationRequest {
            end_date: Some("next tuesday".to_string()),
            ..Default::default()
        };
        assert!(matches!(garbage.into_command(), Err(AppError::InvalidDateRange(_))));
    }

    #[test]
    fn test_unknown_add_on_is_rejected() {
        let result = serde_json::from_str::<CreateReservationRequest>(
            r#"{"vehicle_id": "v1", "add_ons": ["jetpack"]}"#,
        );
        assert!(result.is_err());
    }
}
