//! Public base URL resolution for building short URLs.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Returns the base URL short links are served under, without a trailing slash.
///
/// A configured base always wins. Otherwise the base is derived from the
/// request: the scheme comes from `X-Forwarded-Proto` (default `http`) and the
/// authority from the `Host` header, port included.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if no base is configured and the `Host`
/// header is missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:8000".parse().unwrap());
///
/// assert_eq!(resolve_base_url(None, &headers).unwrap(), "http://localhost:8000");
/// ```
pub fn resolve_base_url(configured: Option<&str>, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(base) = configured {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?;

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| matches!(*v, "http" | "https"))
        .unwrap_or("http");

    Ok(format!("{}://{}", scheme, host.trim_end_matches('/')))
}
