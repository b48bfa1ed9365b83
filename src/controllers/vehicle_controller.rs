//! Catálogo público, vista previa de precio y reseñas

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::dto::reservation_dto::QuoteRequest;
use crate::dto::review_dto::{ReviewListResponse, SubmitReviewRequest};
use crate::dto::vehicle_dto::{VehicleDetailResponse, VehicleQuery};
use crate::dto::ApiResponse;
use crate::middleware::CurrentUser;
use crate::models::review::Review;
use crate::models::vehicle::Vehicle;
use crate::services::PricePreview;
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// GET /api/vehicles
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleQuery>,
) -> AppResult<Json<ApiResponse<Vec<Vehicle>>>> {
    let filter = query.into_filter()?;
    let vehicles = state.catalog.search(&filter).await;
    Ok(Json(ApiResponse::success(vehicles)))
}

/// GET /api/vehicles/:id
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<VehicleDetailResponse>>> {
    let vehicle = state.catalog.get(&id).await?;
    let reviews = state.reviews.rating_summary(&id).await?;
    Ok(Json(ApiResponse::success(VehicleDetailResponse { vehicle, reviews })))
}

/// POST /api/vehicles/:id/quote
pub async fn quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<QuoteRequest>,
) -> AppResult<Json<ApiResponse<PricePreview>>> {
    let (start, end) = request.dates()?;
    let preview = state
        .reservations
        .preview(&id, start, end, &request.add_ons, request.discount_code.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(preview)))
}

/// GET /api/vehicles/:id/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ReviewListResponse>>> {
    let reviews = state.reviews.list_for_vehicle(&id).await?;
    let summary = state.reviews.rating_summary(&id).await?;
    Ok(Json(ApiResponse::success(ReviewListResponse { summary, reviews })))
}

/// POST /api/vehicles/:id/reviews
pub async fn submit_review(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<SubmitReviewRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Review>>)> {
    let review = state
        .reviews
        .submit(current.identity(), &id, request.rating, &request.comment)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(review, "Review published")),
    ))
}
