mod common;

use snaplink::domain::entities::NewLink;
use snaplink::domain::repositories::LinkRepository;
use snaplink::infrastructure::persistence::{PoolSettings, SqliteLinkRepository};
use snaplink::utils::base62;
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;

fn new_link(url: &str) -> NewLink {
    NewLink {
        original_url: url.to_string(),
    }
}

#[tokio::test]
async fn test_create_link() {
    let repo = common::create_test_repo().await;

    let link = repo.create(new_link("https://example.com")).await.unwrap();

    assert_eq!(link.id, 1);
    assert_eq!(link.short_code, "1");
    assert_eq!(link.original_url, "https://example.com");
    assert_eq!(link.clicks, 0);
}

#[tokio::test]
async fn test_create_short_code_matches_id() {
    let repo = common::create_test_repo().await;

    for i in 0..70 {
        let link = repo
            .create(new_link(&format!("https://example.com/{}", i)))
            .await
            .unwrap();
        assert_eq!(link.short_code, base62::encode(link.id as u64));
    }

    let stats = repo.get_stats("10").await.unwrap().unwrap();
    assert_eq!(stats.id, 62);
}

#[tokio::test]
async fn test_create_persists_short_code() {
    let repo = common::create_test_repo().await;
    let link = repo.create(new_link("https://example.com")).await.unwrap();

    let stored: Option<String> = sqlx::query_scalar("SELECT short_code FROM links WHERE id = ?1")
        .bind(link.id)
        .fetch_one(repo.pool())
        .await
        .unwrap();

    assert_eq!(stored.as_deref(), Some(link.short_code.as_str()));
}

#[tokio::test]
async fn test_resolve_increments_clicks() {
    let repo = common::create_test_repo().await;
    let link = repo.create(new_link("https://example.com/x")).await.unwrap();

    let url = repo.resolve_and_record_visit(&link.short_code).await.unwrap();
    assert_eq!(url.as_deref(), Some("https://example.com/x"));

    repo.resolve_and_record_visit(&link.short_code).await.unwrap();

    let stats = repo.get_stats(&link.short_code).await.unwrap().unwrap();
    assert_eq!(stats.clicks, 2);
}

#[tokio::test]
async fn test_resolve_unknown_code() {
    let repo = common::create_test_repo().await;

    let result = repo.resolve_and_record_visit("abc").await.unwrap();

    assert!(result.is_none());
    assert!(repo.get_stats("abc").await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_stats_is_read_only() {
    let repo = common::create_test_repo().await;
    let link = repo.create(new_link("https://example.com")).await.unwrap();

    repo.get_stats(&link.short_code).await.unwrap();
    let stats = repo.get_stats(&link.short_code).await.unwrap().unwrap();

    assert_eq!(stats.clicks, 0);
    assert_eq!(stats.created_at, link.created_at);
}

/// File database with a full pool, so tasks really run on separate connections.
async fn create_file_repo(dir: &TempDir) -> Arc<SqliteLinkRepository> {
    let url = format!("sqlite://{}", dir.path().join("links.db").display());
    let repo = SqliteLinkRepository::connect(&url, &PoolSettings::default())
        .await
        .unwrap();
    repo.migrate().await.unwrap();
    Arc::new(repo)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_codes() {
    const LINKS: usize = 100;

    let dir = TempDir::new().unwrap();
    let repo = create_file_repo(&dir).await;

    let mut handles = Vec::new();
    for i in 0..LINKS {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.create(new_link(&format!("https://example.com/{}", i)))
                .await
                .unwrap()
        }));
    }

    let mut ids = HashSet::new();
    let mut codes = HashSet::new();
    for handle in handles {
        let link = handle.await.unwrap();
        assert_eq!(link.short_code, base62::encode(link.id as u64));
        ids.insert(link.id);
        codes.insert(link.short_code);
    }

    assert_eq!(ids.len(), LINKS);
    assert_eq!(codes.len(), LINKS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_count_every_visit() {
    const VISITS: i64 = 200;

    let dir = TempDir::new().unwrap();
    let repo = create_file_repo(&dir).await;
    let link = repo.create(new_link("https://example.com")).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..VISITS {
        let repo = Arc::clone(&repo);
        let code = link.short_code.clone();
        handles.push(tokio::spawn(async move {
            repo.resolve_and_record_visit(&code).await.unwrap()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap().as_deref(), Some("https://example.com"));
    }

    let stats = repo.get_stats(&link.short_code).await.unwrap().unwrap();
    assert_eq!(stats.clicks, VISITS);

    repo.close().await;
}

#[tokio::test]
async fn test_ping() {
    let repo = common::create_test_repo().await;

    assert!(repo.ping().await.is_ok());

    repo.close().await;
    assert!(repo.ping().await.is_err());
}
