//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves statistics for a short link without counting a click.
///
/// # Endpoint
///
/// `GET /stats/{short_code}`
///
/// # Response
///
/// ```json
/// {
///   "short_code": "21",
///   "original_url": "https://example.com/",
///   "clicks": 2,
///   "created_at": "2024-05-01T12:00:00.123456Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let link = state.link_service.get_stats(&short_code).await?;

    Ok(Json(StatsResponse::from(link)))
}
