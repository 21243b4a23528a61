//! Auth handlers: login, logout, refresh.
//!
//! The refresh token never appears in a response body. It is set as an
//! http-only cookie at login, read back on refresh, and cleared on logout.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use servicehub_core::config::CookieConfig;
use servicehub_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{AccessTokenResponse, ApiResponse, LoginResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let result = state.auth_service.login(&req.email, &req.password).await?;

    let max_age = time::Duration::seconds(state.auth_service.refresh_ttl().num_seconds());
    let cookie = refresh_cookie(&state.config.auth.cookie, result.refresh_token, Some(max_age));

    Ok((
        jar.add(cookie),
        Json(ApiResponse::ok(LoginResponse {
            session_id: result.session_id.into_uuid(),
            access_token: result.access_token,
        })),
    ))
}

/// PATCH /api/v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth: AuthUser,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    state.auth_service.logout(auth.context()).await?;

    Ok((
        jar.add(removal_cookie(&state.config.auth.cookie)),
        Json(ApiResponse::ok(MessageResponse {
            message: "logged out successfully".to_string(),
        })),
    ))
}

/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<ApiResponse<AccessTokenResponse>>, ApiError> {
    let token = jar
        .get(&state.config.auth.cookie.name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::unauthorized("refresh token not found"))?;

    let renewed = state.auth_service.renew_access_token(&token).await?;

    Ok(Json(ApiResponse::ok(AccessTokenResponse {
        access_token: renewed.access_token,
    })))
}

fn refresh_cookie(
    config: &CookieConfig,
    value: String,
    max_age: Option<time::Duration>,
) -> Cookie<'static> {
    let mut cookie = Cookie::build((config.name.clone(), value))
        .http_only(true)
        .secure(config.secure)
        .same_site(same_site(&config.same_site))
        .path(config.path.clone())
        .build();
    cookie.set_max_age(max_age);
    cookie
}

/// An expired, empty refresh cookie. Sent on every logout, whether or not
/// the request carried the cookie.
fn removal_cookie(config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = refresh_cookie(config, String::new(), None);
    cookie.make_removal();
    cookie
}

fn same_site(value: &str) -> SameSite {
    match value.to_ascii_lowercase().as_str() {
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => SameSite::Strict,
    }
}
