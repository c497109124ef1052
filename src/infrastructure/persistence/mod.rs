//! SQL repository implementations.
//!
//! Concrete implementations of [`LinkRepository`] built on SQLx. Both backends
//! share the same schema, embedded from `migrations/<backend>` and applied on
//! startup.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL
//! - [`SqliteLinkRepository`] - SQLite file or in-memory database

pub mod pg_link_repository;
pub mod sqlite_link_repository;

pub use pg_link_repository::PgLinkRepository;
pub use sqlite_link_repository::SqliteLinkRepository;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, DatabaseBackend};
use crate::domain::entities::ShortLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// Connection pool tuning shared by both backends.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

impl From<&Config> for PoolSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_connections: config.db_max_connections,
            connect_timeout: Duration::from_secs(config.db_connect_timeout),
            idle_timeout: Duration::from_secs(config.db_idle_timeout),
            max_lifetime: Duration::from_secs(config.db_max_lifetime),
        }
    }
}

/// Row shape of the `links` table.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct LinkRow {
    pub id: i64,
    pub original_url: String,
    pub short_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl TryFrom<LinkRow> for ShortLink {
    type Error = AppError;

    fn try_from(row: LinkRow) -> Result<Self, Self::Error> {
        let short_code = row.short_code.ok_or_else(|| {
            AppError::internal("Link has no short code", json!({ "id": row.id }))
        })?;

        Ok(ShortLink::new(
            row.id,
            row.original_url,
            short_code,
            row.created_at,
            row.clicks,
        ))
    }
}

/// Opens the repository selected by `config.database_url` and applies migrations.
///
/// # Errors
///
/// Returns an error if the URL scheme is unsupported, the connection fails,
/// or migrations cannot be applied.
pub async fn open_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    let settings = PoolSettings::from(config);

    let backend = DatabaseBackend::from_url(&config.database_url)
        .with_context(|| format!("Unsupported DATABASE_URL scheme: {}", config.database_url))?;

    let repository: Arc<dyn LinkRepository> = match backend {
        DatabaseBackend::Postgres => {
            let repo = PgLinkRepository::connect(&config.database_url, &settings)
                .await
                .context("Failed to connect to PostgreSQL")?;
            repo.migrate().await.context("Failed to migrate PostgreSQL")?;
            Arc::new(repo)
        }
        DatabaseBackend::Sqlite => {
            let repo = SqliteLinkRepository::connect(&config.database_url, &settings)
                .await
                .context("Failed to open SQLite database")?;
            repo.migrate().await.context("Failed to migrate SQLite")?;
            Arc::new(repo)
        }
    };

    tracing::info!(backend = ?backend, "Connected to database");

    Ok(repository)
}
