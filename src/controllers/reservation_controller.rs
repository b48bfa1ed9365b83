//! Reservas del cliente

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::dto::reservation_dto::{CreateReservationRequest, ModifyReservationRequest};
use crate::dto::ApiResponse;
use crate::middleware::CurrentUser;
use crate::models::auth::require_identity;
use crate::models::reservation::Reservation;
use crate::services::BookingOutcome;
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// POST /api/reservations
///
/// Un código de descuento inválido no bloquea la reserva; se informa en
/// `warnings` y en el mensaje.
pub async fn create_reservation(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookingOutcome>>)> {
    // Sin sesión se pide login antes de mirar las fechas
    require_identity(current.identity())?;
    let command = request.into_command()?;
    let outcome = state.reservations.create(current.identity(), command).await?;

    let message = match outcome.warnings.first() {
        Some(warning) => format!("Reservation created. {}", warning.message()),
        None => "Reservation created".to_string(),
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(outcome, message)),
    ))
}

/// GET /api/reservations
pub async fn list_my_reservations(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Reservation>>>> {
    let reservations = state.reservations.list_for_user(current.identity()).await?;
    Ok(Json(ApiResponse::success(reservations)))
}

/// GET /api/reservations/:id
pub async fn get_reservation(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let reservation = state.reservations.get(current.identity(), id).await?;
    Ok(Json(ApiResponse::success(reservation)))
}

/// PUT /api/reservations/:id
pub async fn modify_reservation(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<ModifyReservationRequest>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    require_identity(current.identity())?;
    let changes = request.into_command()?;
    let reservation = state
        .reservations
        .modify(current.identity(), id, changes)
        .await?;
    Ok(Json(ApiResponse::success_with_message(reservation, "Reservation updated")))
}

/// POST /api/reservations/:id/cancel
pub async fn cancel_reservation(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let reservation = state.reservations.cancel(current.identity(), id).await?;
    Ok(Json(ApiResponse::success_with_message(reservation, "Reservation cancelled")))
}
