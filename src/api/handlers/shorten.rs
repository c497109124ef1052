//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base_url::resolve_base_url;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_code": "21",
///   "short_url": "http://localhost:8000/21",
///   "original_url": "https://example.com/very/long/path"
/// }
/// ```
///
/// # Errors
///
/// Returns 422 Unprocessable Entity if the body is malformed or `url` is not
/// an absolute HTTP(S) URL. Nothing is stored in that case.
/// Returns 400 Bad Request if no base URL is configured and `Host` is missing.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let base_url = resolve_base_url(state.base_url.as_deref(), &headers)?;

    let link = state.link_service.create_short_link(&payload.url).await?;

    let short_url = state.link_service.get_short_url(&base_url, &link.short_code);

    Ok(Json(ShortenResponse {
        short_code: link.short_code,
        short_url,
        original_url: link.original_url,
    }))
}
