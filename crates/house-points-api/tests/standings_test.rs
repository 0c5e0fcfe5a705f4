//! Integration tests for the standings endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use house_points_test_support::{FailingScoreStore, StaticAdminRoster};

#[tokio::test]
async fn test_standings_start_at_zero_in_registry_order() {
    let app = common::build_test_app().await;

    let (status, json) = common::get_json(app, "/api/v1/standings").await;

    assert_eq!(status, StatusCode::OK);
    let houses = json["houses"].as_array().unwrap();
    let names: Vec<&str> = houses.iter().map(|h| h["house"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["gryffindor", "slytherin", "ravenclaw", "hufflepuff"]);
    assert!(houses.iter().all(|h| h["points"] == 0));
    assert_eq!(houses[0]["display_name"], "Gryffindor");
}

#[tokio::test]
async fn test_standings_reflect_webhook_changes() {
    let app = common::build_test_app().await;

    common::send_command(
        app.clone(),
        common::HEADMASTER,
        common::HEADMASTER,
        "/add_points 15 ravenclaw",
    )
    .await;
    let (status, json) = common::get_json(app, "/api/v1/standings").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["houses"][2]["house"], "ravenclaw");
    assert_eq!(json["houses"][2]["points"], 15);
}

#[tokio::test]
async fn test_standings_store_failure_returns_500() {
    let app = common::build_test_app_over(
        Arc::new(FailingScoreStore),
        None,
        Arc::new(StaticAdminRoster::new(&[])),
    );

    let (status, json) = common::get_json(app, "/api/v1/standings").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "persistence_error");
}
