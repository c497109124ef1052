#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;
use snaplink::api::routes::public_routes;
use snaplink::routes::app_router;
use tower_http::normalize_path::NormalizePath;
use snaplink::infrastructure::persistence::SqliteLinkRepository;
use snaplink::state::AppState;

pub const TEST_BASE_URL: &str = "http://sho.rt";

pub async fn create_test_repo() -> Arc<SqliteLinkRepository> {
    Arc::new(SqliteLinkRepository::in_memory().await.unwrap())
}

pub fn create_test_state(repo: Arc<SqliteLinkRepository>, base_url: Option<&str>) -> AppState {
    AppState::new(repo, base_url.map(str::to_string))
}

pub fn create_test_app(state: AppState) -> Router {
    public_routes().with_state(state)
}

/// Full application stack, middleware included.
pub async fn create_test_router() -> NormalizePath<Router> {
    let repo = create_test_repo().await;
    app_router(create_test_state(repo, Some(TEST_BASE_URL)))
}

/// Server over a fresh in-memory database with a fixed base URL.
pub async fn create_test_server() -> (TestServer, Arc<SqliteLinkRepository>) {
    let repo = create_test_repo().await;
    let state = create_test_state(repo.clone(), Some(TEST_BASE_URL));
    let server = TestServer::new(create_test_app(state)).unwrap();
    (server, repo)
}

pub async fn create_test_link(server: &TestServer, url: &str) -> String {
    let response = server
        .post("/shorten")
        .json(&serde_json::json!({ "url": url }))
        .await;

    response.assert_status_ok();
    response.json::<serde_json::Value>()["short_code"]
        .as_str()
        .unwrap()
        .to_string()
}
