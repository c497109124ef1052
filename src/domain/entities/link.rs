//! Short link entity.

use chrono::{DateTime, Utc};

/// A persisted mapping from a short code to its original URL.
///
/// `short_code` is always `base62::encode(id)`; the store assigns both inside
/// one transaction, so a link without a code is never observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
            clicks,
        }
    }
}

/// Input data for creating a new link.
///
/// `original_url` must already be validated and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub original_url: String,
}
