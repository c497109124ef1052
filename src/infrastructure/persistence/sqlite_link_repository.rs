//! SQLite implementation of link repository.
//!
//! Serves both file databases (`sqlite://urls.db`) and in-memory databases
//! (`sqlite::memory:`). An in-memory database lives only as long as its
//! connection, so that case pins the pool to one connection that never expires.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::{LinkRow, PoolSettings};
use crate::domain::entities::{NewLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::base62::encode_id;

/// SQLite repository for link storage and retrieval.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Opens `database_url`, creating the database file if it is missing.
    pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new()
                .max_connections(settings.max_connections)
                .idle_timeout(Some(settings.idle_timeout))
                .max_lifetime(Some(settings.max_lifetime))
        };

        let pool = pool_options
            .acquire_timeout(settings.connect_timeout)
            .connect_with(options)
            .await?;

        Ok(Self::new(Arc::new(pool)))
    }

    /// Opens a fresh, migrated in-memory database.
    pub async fn in_memory() -> Result<Self, AppError> {
        let repo = Self::connect("sqlite::memory:", &PoolSettings::default()).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Applies the embedded SQLite migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations/sqlite")
            .run(self.pool.as_ref())
            .await?;
        Ok(())
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        self.pool.as_ref()
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<ShortLink, AppError> {
        let mut tx = self.pool.begin().await?;

        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO links (original_url, created_at, clicks)
            VALUES (?1, ?2, 0)
            RETURNING id, created_at
            "#,
        )
        .bind(&new_link.original_url)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let short_code = encode_id(id)?;

        sqlx::query("UPDATE links SET short_code = ?1 WHERE id = ?2")
            .bind(&short_code)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(ShortLink::new(
            id,
            new_link.original_url,
            short_code,
            created_at,
            0,
        ))
    }

    async fn resolve_and_record_visit(&self, short_code: &str) -> Result<Option<String>, AppError> {
        let original_url = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE links
            SET clicks = clicks + 1
            WHERE short_code = ?1
            RETURNING original_url
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(original_url)
    }

    async fn get_stats(&self, short_code: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_url, short_code, created_at, clicks
            FROM links
            WHERE short_code = ?1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ShortLink::try_from).transpose()
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
