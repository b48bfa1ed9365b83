//! Registro, login y perfil propio

use axum::{extract::State, http::StatusCode, Json};

use crate::dto::auth_dto::AuthResponse;
use crate::dto::ApiResponse;
use crate::middleware::CurrentUser;
use crate::models::user::{LoginRequest, SignupRequest, UpdateProfileRequest, UserResponse};
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let session = state.auth.signup(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(session, "Account created")),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let session = state.auth.login(request).await?;
    Ok(Json(ApiResponse::success_with_message(session, "Login successful")))
}

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let profile = state.auth.get_profile(current.identity()).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let profile = state.auth.update_profile(current.identity(), request).await?;
    Ok(Json(ApiResponse::success_with_message(profile, "Profile updated")))
}
