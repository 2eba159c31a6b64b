use reqwest::Response;
use serde_json::{Value, json};
use url_registry::store::InMemoryUrlRepository;
use uuid::Uuid;

use crate::helpers::{TestApp, UnavailableStore, spawn_app_with};

async fn spawn_unavailable_app() -> TestApp {
    spawn_app_with(UnavailableStore, InMemoryUrlRepository::new()).await
}

async fn assert_internal_error(response: Response, message: &str) {
    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(
        response.headers()["access-control-allow-methods"],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    let body: Value = response.json().await.expect("body is not json");
    assert_eq!(body, json!({ "success": false, "error": message }));
}

#[tokio::test]
async fn list_reports_the_store_message_when_the_store_is_down() {
    let app = spawn_unavailable_app().await;

    let response = app.list_urls().await;

    assert_internal_error(response, &sqlx::Error::PoolTimedOut.to_string()).await;
}

#[tokio::test]
async fn create_reports_the_store_message_when_the_store_is_down() {
    let app = spawn_unavailable_app().await;

    let response = app
        .create_url(&json!({ "name": "docs", "mainUrl": "https://docs.rs" }))
        .await;

    assert_internal_error(response, &sqlx::Error::PoolTimedOut.to_string()).await;
}

#[tokio::test]
async fn update_reports_a_generic_message_when_the_store_is_down() {
    let app = spawn_unavailable_app().await;

    let response = app
        .update_url(
            &Uuid::new_v4().to_string(),
            &json!({ "name": "A", "mainUrl": "http://a" }),
        )
        .await;

    assert_internal_error(response, "Failed to update URL").await;
}

#[tokio::test]
async fn delete_reports_a_generic_message_when_the_store_is_down() {
    let app = spawn_unavailable_app().await;

    let response = app.delete_url(&Uuid::new_v4().to_string()).await;

    assert_internal_error(response, "Failed to delete URL").await;
}

#[tokio::test]
async fn client_errors_are_still_reported_when_the_store_is_down() {
    let app = spawn_unavailable_app().await;

    let response = app.create_url(&json!({ "name": "" })).await;

    assert_eq!(response.status().as_u16(), 400);
}
