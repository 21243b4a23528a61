//! Category handlers.

use axum::Json;
use axum::extract::{Query, State};

use servicehub_service::CategoryListing;

use crate::dto::request::CategoryQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<ApiResponse<CategoryListing>>, ApiError> {
    let listing = state
        .category_service
        .list(query.include_subcategories())
        .await?;
    Ok(Json(ApiResponse::ok(listing)))
}
