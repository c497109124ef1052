//! Public route configuration.

use crate::api::handlers::{
    health_handler, index_handler, redirect_handler, shorten_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All service routes. None require authentication.
///
/// # Endpoints
///
/// - `GET  /`                    - Landing page with the shorten form
/// - `POST /shorten`             - Create a short link
/// - `GET  /stats/{short_code}`  - Click statistics for a link
/// - `GET  /api/health`          - Health check
/// - `GET  /{short_code}`        - Redirect to the original URL
///
/// Static segments take priority over `/{short_code}`, so `GET /shorten`
/// answers 405 even once the code `shorten` has been issued.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/shorten", post(shorten_handler))
        .route("/stats/{short_code}", get(stats_handler))
        .route("/api/health", get(health_handler))
        .route("/{short_code}", get(redirect_handler))
}
