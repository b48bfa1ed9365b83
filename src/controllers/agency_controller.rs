//! Panel de la agencia: reservas y flota

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::dto::reservation_dto::StatusUpdateRequest;
use crate::dto::vehicle_dto::AvailabilityRequest;
use crate::dto::ApiResponse;
use crate::middleware::CurrentUser;
use crate::models::reservation::Reservation;
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// GET /api/agency/reservations
pub async fn list_all_reservations(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Reservation>>>> {
    let reservations = state.reservations.list_all(current.identity()).await?;
    Ok(Json(ApiResponse::success(reservations)))
}

/// PUT /api/agency/reservations/:id/status
pub async fn update_reservation_status(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<StatusUpdateRequest>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let reservation = state
        .reservations
        .update_status(current.identity(), id, request.status)
        .await?;
    let message = format!("Reservation is now {}", reservation.status);
    Ok(Json(ApiResponse::success_with_message(reservation, message)))
}

/// POST /api/agency/vehicles
pub async fn add_vehicle(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<NewVehicle>,
) -> AppResult<(StatusCode, Json<ApiResponse<Vehicle>>)> {
    let vehicle = state.catalog.add_vehicle(current.identity(), request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(vehicle, "Vehicle added")),
    ))
}

/// PUT /api/agency/vehicles/:id/availability
pub async fn set_vehicle_availability(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<AvailabilityRequest>,
) -> AppResult<Json<ApiResponse<Vehicle>>> {
    let vehicle = state
        .catalog
        .set_availability(current.identity(), &id, request.available)
        .await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

/// DELETE /api/agency/vehicles/:id
pub async fn remove_vehicle(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vehicle>>> {
    let vehicle = state.catalog.remove_vehicle(current.identity(), &id).await?;
    Ok(Json(ApiResponse::success_with_message(vehicle, "Vehicle removed")))
}
