//! Modelo de Reservation
//!
//! Registro persistido de una reserva, su máquina de estados y el catálogo
//! fijo de extras.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Estado de la reserva
///
/// `pending → confirmed → completed`, y `pending | confirmed → cancelled`.
/// `cancelled` y `completed` son terminales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ReservationStatus::Cancelled | ReservationStatus::Completed)
    }

    /// Transiciones permitidas (la misma transición no cuenta)
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Completed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            "completed" => Ok(ReservationStatus::Completed),
            other => Err(format!("unknown reservation status '{}'", other)),
        }
    }
}

/// Extras opcionales con tarifa diaria (TND)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOn {
    Insurance,
    ChildSeat,
    Gps,
    AdditionalDriver,
}

impl AddOn {
    pub const ALL: [AddOn; 4] = [
        AddOn::Insurance,
        AddOn::ChildSeat,
        AddOn::Gps,
        AddOn::AdditionalDriver,
    ];

    pub fn daily_rate(&self) -> Decimal {
        match self {
            AddOn::Insurance => Decimal::new(25, 0),
            AddOn::ChildSeat => Decimal::new(15, 0),
            AddOn::Gps => Decimal::new(10, 0),
            AddOn::AdditionalDriver => Decimal::new(30, 0),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AddOn::Insurance => "insurance",
            AddOn::ChildSeat => "child_seat",
            AddOn::Gps => "gps",
            AddOn::AdditionalDriver => "additional_driver",
        }
    }
}

/// Reserva persistida
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub vehicle_id: String,
    pub vehicle_name: String,
    /// Tarifa del vehículo al momento de reservar; base de las modificaciones
    pub price_per_day: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub rental_days: i64,
    pub base_price: Decimal,
    pub add_ons: BTreeSet<AddOn>,
    pub add_on_price: Decimal,
    pub discount_code: Option<String>,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub total_price: Decimal,
    pub status: ReservationStatus,
    pub user_id: Uuid,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
