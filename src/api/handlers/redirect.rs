//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// Each successful redirect increments the link's click counter exactly once,
/// in the same statement that reads the target URL.
///
/// # Errors
///
/// Returns 404 Not Found with `{"detail": "URL not found"}` if the short code
/// doesn't exist.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.link_service.resolve(&short_code).await?;

    Ok(Redirect::temporary(&original_url))
}
