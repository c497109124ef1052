//! Handler for the landing page.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Serves the static page with a form that calls `POST /shorten`.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
