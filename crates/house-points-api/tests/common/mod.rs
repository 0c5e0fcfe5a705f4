//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use house_points_core::house::HouseRegistry;
use house_points_core::identity::UserId;
use house_points_core::roster::AdminRoster;
use house_points_core::store::ScoreStore;
use house_points_scoring::application::authorization::Authorizer;
use house_points_scoring::application::dispatcher::Dispatcher;
use house_points_store::InMemoryScoreStore;
use house_points_test_support::StaticAdminRoster;
use tower::ServiceExt;

use house_points_api::routes;
use house_points_api::state::{AppState, WebhookSettings};

/// Path token the test app accepts.
pub const PATH_TOKEN: &str = "test-token";
/// Allow-listed headmaster.
pub const HEADMASTER: i64 = 1;
/// Administrator of [`GREAT_HALL`].
pub const PROFESSOR: i64 = 2;
/// Ordinary member of [`GREAT_HALL`].
pub const STUDENT: i64 = 3;
/// A supergroup chat.
pub const GREAT_HALL: i64 = -100_777;

/// Builds the app over an initialized in-memory store.
pub async fn build_test_app() -> Router {
    build_test_app_with(None, Arc::new(StaticAdminRoster::new(&[PROFESSOR]))).await
}

/// Builds the app with an optional webhook secret and a custom roster.
pub async fn build_test_app_with(secret: Option<&str>, roster: Arc<dyn AdminRoster>) -> Router {
    let store = Arc::new(InMemoryScoreStore::new(HouseRegistry::default()));
    store.initialize().await.unwrap();
    build_test_app_over(store, secret, roster)
}

/// Builds the app over an already initialized store.
pub fn build_test_app_over(
    store: Arc<dyn ScoreStore>,
    secret: Option<&str>,
    roster: Arc<dyn AdminRoster>,
) -> Router {
    let authorizer = Authorizer::new([UserId(HEADMASTER)], roster, Duration::from_millis(100));
    let dispatcher = Dispatcher::new(HouseRegistry::default(), store, Arc::new(authorizer));
    let state = AppState::new(
        dispatcher,
        WebhookSettings {
            path_token: PATH_TOKEN.to_owned(),
            secret_token: secret.map(str::to_owned),
        },
    );
    routes::app(state)
}

/// A text message update from `user_id` in `chat_id`.
pub fn message_update(user_id: i64, chat_id: i64, text: &str) -> serde_json::Value {
    let chat_type = if chat_id < 0 { "supergroup" } else { "private" };
    serde_json::json!({
        "update_id": 1000,
        "message": {
            "message_id": 42,
            "date": 1_700_000_000,
            "from": { "id": user_id, "is_bot": false, "first_name": "Test" },
            "chat": { "id": chat_id, "type": chat_type },
            "text": text
        }
    })
}

/// The webhook URI for `token`.
pub fn webhook_uri(token: &str) -> String {
    format!("/webhook/{token}")
}

/// Send a POST request with a JSON body and return the status and raw body.
pub async fn post_raw(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
    secret: Option<&str>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(secret) = secret {
        builder = builder.header("x-telegram-bot-api-secret-token", secret);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, body_bytes.to_vec())
}

/// Send a POST request with a JSON body and return the response as JSON.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = post_raw(app, uri, body, None).await;
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

/// Posts `text` from `user_id` in `chat_id` and returns the reply text, if any.
pub async fn send_command(app: Router, user_id: i64, chat_id: i64, text: &str) -> Option<String> {
    let (status, bytes) = post_raw(
        app,
        &webhook_uri(PATH_TOKEN),
        &message_update(user_id, chat_id, text),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    if bytes.is_empty() {
        return None;
    }
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    json["text"].as_str().map(str::to_owned)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
