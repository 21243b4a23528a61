//! User handlers: registration, own profile, professionals directory.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::RegisterRequest;
use crate::dto::response::{ApiResponse, ProfessionalResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /api/v1/users/register
pub async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state.user_service.register(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(user))),
    ))
}

/// GET /api/v1/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_profile(auth.context()).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// GET /api/v1/users/professionals
pub async fn list_professionals(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProfessionalResponse>>>, ApiError> {
    let professionals = state.user_service.list_professionals().await?;
    Ok(Json(ApiResponse::ok(
        professionals.into_iter().map(ProfessionalResponse::from).collect(),
    )))
}
