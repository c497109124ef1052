//! Link creation, resolution and statistics service.

use std::sync::Arc;

use crate::domain::entities::{NewLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::base62;
use crate::utils::url_normalizer::normalize_url;
use serde_json::json;
use tracing::{debug, info};

/// Service for creating short links and resolving them.
///
/// Validates input before it reaches the repository, and short-circuits
/// lookups of codes that cannot have been issued.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(repository: Arc<L>) -> Self {
        Self { repository }
    }

    /// Creates a short link for `original_url`.
    ///
    /// Every call creates a new record; the same URL submitted twice gets two
    /// different codes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute
    /// `http(s)` URL. Nothing is persisted in that case.
    ///
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn create_short_link(&self, original_url: &str) -> Result<ShortLink, AppError> {
        let original_url = normalize_url(original_url).map_err(|e| {
            AppError::validation("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let link = self.repository.create(NewLink { original_url }).await?;

        info!(id = link.id, short_code = %link.short_code, "Short link created");

        Ok(link)
    }

    /// Resolves `short_code` to its original URL and records one click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        if !is_well_formed(short_code) {
            debug!(short_code, "Rejected malformed short code");
            return Err(AppError::url_not_found(short_code));
        }

        let original_url = self
            .repository
            .resolve_and_record_visit(short_code)
            .await?
            .ok_or_else(|| AppError::url_not_found(short_code))?;

        debug!(short_code, "Resolved short code");

        Ok(original_url)
    }

    /// Returns the stored link for `short_code` without recording a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn get_stats(&self, short_code: &str) -> Result<ShortLink, AppError> {
        if !is_well_formed(short_code) {
            return Err(AppError::url_not_found(short_code));
        }

        self.repository
            .get_stats(short_code)
            .await?
            .ok_or_else(|| AppError::url_not_found(short_code))
    }

    /// Checks that the repository is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store cannot be queried.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Releases the repository's connections.
    pub async fn shutdown(&self) {
        self.repository.close().await;
    }

    /// Constructs the full short URL from a base URL and code.
    pub fn get_short_url(&self, base_url: &str, short_code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), short_code)
    }
}

/// A code can only exist if it decodes as base62.
fn is_well_formed(short_code: &str) -> bool {
    base62::decode(short_code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::base62::encode;
    use chrono::Utc;

    fn create_test_link(id: i64, url: &str, clicks: i64) -> ShortLink {
        ShortLink::new(
            id,
            url.to_string(),
            encode(id as u64),
            Utc::now(),
            clicks,
        )
    }

    #[tokio::test]
    async fn test_create_short_link_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.original_url == "https://example.com/very/long/path")
            .times(1)
            .returning(|new_link| Ok(create_test_link(125, &new_link.original_url, 0)));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service
            .create_short_link("https://example.com/very/long/path")
            .await
            .unwrap();

        assert_eq!(link.short_code, encode(link.id as u64));
        assert_eq!(link.short_code, "21");
        assert_eq!(link.clicks, 0);
    }

    #[tokio::test]
    async fn test_create_short_link_normalizes_url() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.original_url == "https://example.com/path")
            .times(1)
            .returning(|new_link| Ok(create_test_link(1, &new_link.original_url, 0)));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .create_short_link("https://EXAMPLE.COM:443/path")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_short_link_invalid_url_not_persisted() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.create_short_link("not a url").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_rejects_unsupported_scheme() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.create_short_link("ftp://example.com/file").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_short_link_storage_error() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::storage("Database error", json!(null))));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.create_short_link("https://example.com").await;

        assert!(matches!(result.unwrap_err(), AppError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_resolve_and_record_visit()
            .withf(|code| code == "21")
            .times(1)
            .returning(|_| Ok(Some("https://example.com/".to_string())));

        let service = LinkService::new(Arc::new(mock_repo));

        let url = service.resolve("21").await.unwrap();
        assert_eq!(url, "https://example.com/");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_resolve_and_record_visit()
            .withf(|code| code == "zzz")
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));

        let err = service.resolve("zzz").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "URL not found");
    }

    #[tokio::test]
    async fn test_resolve_overflowing_code_skips_repository() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_resolve_and_record_visit().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        // Twelve base62 digits exceed u64, so no id could map to this code.
        let err = service.resolve("doesnotexist").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "URL not found");
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_repository() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_resolve_and_record_visit().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        for code in ["", "abc-1", "a.b", "ключ"] {
            let err = service.resolve(code).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound { .. }), "{code}");
        }
    }

    #[tokio::test]
    async fn test_get_stats_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_get_stats()
            .withf(|code| code == "1")
            .times(1)
            .returning(|_| Ok(Some(create_test_link(1, "https://example.com/", 2))));

        mock_repo.expect_resolve_and_record_visit().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service.get_stats("1").await.unwrap();
        assert_eq!(link.clicks, 2);
        assert_eq!(link.original_url, "https://example.com/");
    }

    #[tokio::test]
    async fn test_get_stats_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_get_stats()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.get_stats("zzz").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_health_check_propagates_error() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_ping()
            .times(1)
            .returning(|| Err(AppError::storage("Database error", json!(null))));

        let service = LinkService::new(Arc::new(mock_repo));

        assert!(service.health_check().await.is_err());
    }

    #[test]
    fn test_get_short_url() {
        let service = LinkService::new(Arc::new(MockLinkRepository::new()));

        assert_eq!(
            service.get_short_url("http://localhost:8000/", "21"),
            "http://localhost:8000/21"
        );
        assert_eq!(
            service.get_short_url("https://sho.rt", "aZ"),
            "https://sho.rt/aZ"
        );
    }
}
