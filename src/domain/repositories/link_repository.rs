//! Repository trait for short link data access.

use crate::domain::entities::{NewLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistent store of short links.
///
/// Implementations must keep `id` and `short_code` unique and must serialize
/// concurrent click increments on the same row.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite (file or in-memory)
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a link and assigns its short code.
    ///
    /// Inserts the row to obtain its id, then writes `base62::encode(id)` back
    /// as the short code. Both writes commit together.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<ShortLink, AppError>;

    /// Atomically increments the click counter of `short_code` and returns
    /// the original URL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the code exists
    /// - `Ok(None)` if not found; nothing is written
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn resolve_and_record_visit(&self, short_code: &str) -> Result<Option<String>, AppError>;

    /// Reads a link by short code without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn get_stats(&self, short_code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;

    /// Closes the underlying connection pool. Further calls fail.
    async fn close(&self);
}
