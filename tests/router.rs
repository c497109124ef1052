mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn shorten_request(uri: &str, url: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "url": url }).to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_app_router_shorten_and_stats() {
    let app = common::create_test_router().await;

    let response = app
        .clone()
        .oneshot(shorten_request("/shorten", "https://example.com/page"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["short_url"], "http://sho.rt/1");

    let response = app.oneshot(get("/stats/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["original_url"], "https://example.com/page");
}

#[tokio::test]
async fn test_app_router_trims_trailing_slash() {
    let app = common::create_test_router().await;

    let response = app
        .clone()
        .oneshot(shorten_request("/shorten/", "https://example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/stats/1/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["short_code"], "1");
    assert_eq!(body["clicks"], 0);

    let response = app.oneshot(get("/1/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://example.com/"
    );
}

#[tokio::test]
async fn test_app_router_unknown_code() {
    let app = common::create_test_router().await;

    let response = app.oneshot(get("/stats/zz/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["detail"], "URL not found");
}
