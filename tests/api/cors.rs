use reqwest::{Method, Response};
use serde_json::json;

use crate::helpers::spawn_app;

fn assert_cors_headers(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(
        headers["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
}

#[tokio::test]
async fn preflight_returns_204_with_an_empty_body() {
    let app = spawn_app().await;

    for path in ["/urls", "/urls/", "/urls/0b9e7c4e-8f7e-4f55-9d39-1f6a3c4b2d10"] {
        let response = app
            .client
            .request(Method::OPTIONS, app.url(path))
            .header("Origin", "http://localhost:5173")
            .header("Access-Control-Request-Method", "PUT")
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(response.status().as_u16(), 204, "path {path}");
        assert_cors_headers(&response);
        assert!(response.bytes().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn successful_responses_carry_cors_headers() {
    let app = spawn_app().await;

    let created = app
        .create_url(&json!({ "name": "docs", "mainUrl": "https://docs.rs" }))
        .await;
    assert_cors_headers(&created);

    let listed = app.list_urls().await;
    assert_cors_headers(&listed);
}

#[tokio::test]
async fn error_responses_carry_cors_headers() {
    let app = spawn_app().await;

    let bad_request = app.create_url(&json!({ "name": "" })).await;
    assert_eq!(bad_request.status().as_u16(), 400);
    assert_cors_headers(&bad_request);

    let not_found = app.delete_url(&uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(not_found.status().as_u16(), 404);
    assert_cors_headers(&not_found);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = spawn_app().await;

    let response = app.list_urls().await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id is missing");
    assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
}
