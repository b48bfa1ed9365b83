//! Servicio de reservas
//!
//! Crea, modifica y cancela reservas, y aplica la máquina de estados para
//! la agencia. Cada ciclo leer → calcular → escribir se hace con el mutex
//! de escritura tomado, así dos requests concurrentes no pisan sus cambios.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PricingConfig;
use crate::database::RecordStore;
use crate::models::auth::{require_agency, require_identity, Identity};
use crate::models::reservation::{AddOn, Reservation, ReservationStatus};
use crate::repositories::ReservationRepository;
use crate::services::catalog_service::CatalogService;
use crate::services::pricing::{self, DiscountPolicy, DiscountResolution, PriceQuote};
use crate::utils::errors::{AppError, AppResult, BookingWarning};

/// Datos de una nueva reserva
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReservation {
    pub vehicle_id: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub add_ons: BTreeSet<AddOn>,
    pub discount_code: Option<String>,
}

/// Cambios sobre una reserva; lo omitido conserva su valor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModifyReservation {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub add_ons: Option<BTreeSet<AddOn>>,
}

/// Resultado de crear una reserva
#[derive(Debug, Clone, Serialize)]
pub struct BookingOutcome {
    pub reservation: Reservation,
    pub warnings: Vec<BookingWarning>,
}

/// Vista previa de precio, sin persistir nada
#[derive(Debug, Clone, Serialize)]
pub struct PricePreview {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub available: bool,
    pub discount_code: Option<String>,
    #[serde(flatten)]
    pub quote: PriceQuote,
    pub warnings: Vec<BookingWarning>,
}

pub struct ReservationService {
    repository: ReservationRepository,
    catalog: Arc<CatalogService>,
    discounts: DiscountPolicy,
    initial_status: ReservationStatus,
    write_lock: Mutex<()>,
}

impl ReservationService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        catalog: Arc<CatalogService>,
        pricing: &PricingConfig,
    ) -> Self {
        Self {
            repository: ReservationRepository::new(store),
            catalog,
            discounts: DiscountPolicy::from(pricing),
            initial_status: pricing.initial_status,
            write_lock: Mutex::new(()),
        }
    }

    /// Crear una reserva
    ///
    /// Orden de validación: sesión, perfil, fechas, vehículo y
    /// disponibilidad. Nada se calcula ni se guarda si alguna falla.
    pub async fn create(
        &self,
        identity: Option<&Identity>,
        request: CreateReservation,
    ) -> AppResult<BookingOutcome> {
        let identity = require_identity(identity).map_err(|e| {
            warn!("⚠️ Reserva rechazada: usuario no autenticado");
            e
        })?;

        let missing = identity.missing_booking_fields();
        if !missing.is_empty() {
            warn!("⚠️ Reserva rechazada para {}: perfil incompleto ({:?})", identity.user_id, missing);
            return Err(AppError::IncompleteProfile(missing));
        }

        let (start, end) = required_dates(request.start_date, request.end_date)?;
        pricing::rental_days(start, end)?;

        let vehicle = self.catalog.get(&request.vehicle_id).await?;
        if !vehicle.available {
            warn!("⚠️ Reserva rechazada: vehículo {} no disponible", vehicle.id);
            return Err(AppError::VehicleUnavailable(vehicle.id));
        }

        let (discount, warnings) = self.resolve_discount(request.discount_code.as_deref());
        let quote = pricing::quote(
            vehicle.price_per_day,
            start,
            end,
            &request.add_ons,
            discount.percent(),
        )?;

        let now = Utc::now();
        let reservation = Reservation {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id.clone(),
            vehicle_name: vehicle.display_name(),
            price_per_day: vehicle.price_per_day,
            start_date: start,
            end_date: end,
            rental_days: quote.rental_days,
            base_price: quote.base_price,
            add_ons: request.add_ons,
            add_on_price: quote.add_on_price,
            discount_code: discount.applied_code(),
            discount_percent: quote.discount_percent,
            discount_amount: quote.discount_amount,
            total_price: quote.total_price,
            status: self.initial_status,
            user_id: identity.user_id,
            user_name: identity.name.clone(),
            created_at: now,
            updated_at: now,
        };

        {
            let _guard = self.write_lock.lock().await;
            self.repository.insert(&reservation).await?;
        }

        info!(
            "✅ Reserva {} creada: {} por {} días, total {} TND",
            reservation.id, reservation.vehicle_name, reservation.rental_days, reservation.total_price
        );

        Ok(BookingOutcome {
            reservation,
            warnings,
        })
    }

    /// Calcular el precio sin crear la reserva
    pub async fn preview(
        &self,
        vehicle_id: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        add_ons: &BTreeSet<AddOn>,
        discount_code: Option<&str>,
    ) -> AppResult<PricePreview> {
        let (start, end) = required_dates(start_date, end_date)?;
        let vehicle = self.catalog.get(vehicle_id).await?;

        let (discount, warnings) = self.resolve_discount(discount_code);
        let quote = pricing::quote(vehicle.price_per_day, start, end, add_ons, discount.percent())?;

        Ok(PricePreview {
            vehicle_name: vehicle.display_name(),
            vehicle_id: vehicle.id,
            available: vehicle.available,
            discount_code: discount.applied_code(),
            quote,
            warnings,
        })
    }

    /// Modificar fechas o extras y recalcular el precio
    ///
    /// Se usan la tarifa y el descuento guardados en la reserva.
    pub async fn modify(
        &self,
        identity: Option<&Identity>,
        id: Uuid,
        changes: ModifyReservation,
    ) -> AppResult<Reservation> {
        let identity = require_identity(identity)?;

        let _guard = self.write_lock.lock().await;
        let mut reservation = self.find(id).await?;

        if !reservation.is_owned_by(identity.user_id) {
            return Err(AppError::NotOwner);
        }
        if reservation.status.is_terminal() {
            return Err(AppError::InvalidStatusTransition {
                from: reservation.status,
                to: reservation.status,
            });
        }

        let start = changes.start_date.unwrap_or(reservation.start_date);
        let end = changes.end_date.unwrap_or(reservation.end_date);
        let add_ons = changes.add_ons.unwrap_or_else(|| reservation.add_ons.clone());

        let quote = pricing::quote(
            reservation.price_per_day,
            start,
            end,
            &add_ons,
            reservation.discount_percent,
        )?;

        reservation.start_date = start;
        reservation.end_date = end;
        reservation.add_ons = add_ons;
        reservation.rental_days = quote.rental_days;
        reservation.base_price = quote.base_price;
        reservation.add_on_price = quote.add_on_price;
        reservation.discount_amount = quote.discount_amount;
        reservation.total_price = quote.total_price;
        reservation.updated_at = Utc::now();

        self.repository.update(&reservation).await?;

        info!(
            "✏️ Reserva {} modificada: {} días, total {} TND",
            reservation.id, reservation.rental_days, reservation.total_price
        );
        Ok(reservation)
    }

    /// Cancelar una reserva (propietario o agencia)
    ///
    /// Cancelar dos veces no es un error: la segunda llamada no cambia nada.
    pub async fn cancel(&self, identity: Option<&Identity>, id: Uuid) -> AppResult<Reservation> {
        let identity = require_identity(identity)?;

        let _guard = self.write_lock.lock().await;
        let mut reservation = self.find(id).await?;

        if !reservation.is_owned_by(identity.user_id) && !identity.is_agency() {
            return Err(AppError::NotOwner);
        }

        match reservation.status {
            ReservationStatus::Cancelled => return Ok(reservation),
            from if !from.can_transition_to(ReservationStatus::Cancelled) => {
                return Err(AppError::InvalidStatusTransition {
                    from,
                    to: ReservationStatus::Cancelled,
                });
            }
            _ => {}
        }

        reservation.status = ReservationStatus::Cancelled;
        reservation.updated_at = Utc::now();
        self.repository.update(&reservation).await?;

        info!("🚫 Reserva {} cancelada por {}", reservation.id, identity.user_id);
        Ok(reservation)
    }

    /// Cambiar el estado de una reserva (sólo agencia)
    pub async fn update_status(
        &self,
        identity: Option<&Identity>,
        id: Uuid,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        let agent = require_agency(identity, "update reservation status")?;

        let _guard = self.write_lock.lock().await;
        let mut reservation = self.find(id).await?;
        let from = reservation.status;

        if from == ReservationStatus::Cancelled && status == ReservationStatus::Cancelled {
            return Ok(reservation);
        }
        if !from.can_transition_to(status) {
            return Err(AppError::InvalidStatusTransition { from, to: status });
        }

        reservation.status = status;
        reservation.updated_at = Utc::now();
        self.repository.update(&reservation).await?;

        info!("🔄 Reserva {}: {} → {} ({})", reservation.id, from, status, agent.name);
        Ok(reservation)
    }

    /// Una reserva visible para el usuario (propia, o cualquiera si es agencia)
    pub async fn get(&self, identity: Option<&Identity>, id: Uuid) -> AppResult<Reservation> {
        let identity = require_identity(identity)?;
        let reservation = self.find(id).await?;

        if !reservation.is_owned_by(identity.user_id) && !identity.is_agency() {
            return Err(AppError::NotOwner);
        }
        Ok(reservation)
    }

    /// Reservas del usuario actual, en orden de creación
    pub async fn list_for_user(&self, identity: Option<&Identity>) -> AppResult<Vec<Reservation>> {
        let identity = require_identity(identity)?;
        self.repository.find_by_user(identity.user_id).await
    }

    /// Todas las reservas (sólo agencia)
    pub async fn list_all(&self, identity: Option<&Identity>) -> AppResult<Vec<Reservation>> {
        require_agency(identity, "list all reservations")?;
        self.repository.find_all().await
    }

    async fn find(&self, id: Uuid) -> AppResult<Reservation> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ReservationNotFound(id.to_string()))
    }

    fn resolve_discount(&self, code: Option<&str>) -> (DiscountResolution, Vec<BookingWarning>) {
        let discount = self.discounts.resolve(code);
        let mut warnings = Vec::new();
        if let DiscountResolution::Rejected(code) = &discount {
            warn!("⚠️ Código de descuento inválido: {}", code);
            warnings.push(BookingWarning::InvalidDiscountCode(code.clone()));
        }
        (discount, warnings)
    }
}

fn required_dates(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        (None, _) => Err(AppError::InvalidDateRange("start date is required".to_string())),
        (_, None) => Err(AppError::InvalidDateRange("end date is required".to_string())),
    }
}
