//! HTTP-level tests for notes.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use serde_json::json;

#[tokio::test]
async fn create_defaults_title() {
    let app = common::build_test_app();
    let token = common::register(&app, "scribe").await;

    let response = post_json_auth(&app, "/api/v1/notes", json!({ "content": "Loot: 40gp" }), &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Untitled Note");
    assert_eq!(json["content"], "Loot: 40gp");
}

#[tokio::test]
async fn overlong_title_is_rejected() {
    let app = common::build_test_app();
    let token = common::register(&app, "scribe").await;

    let response = post_json_auth(&app, "/api/v1/notes", json!({ "title": "x".repeat(201) }), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn notes_crud_round_trip() {
    let app = common::build_test_app();
    let token = common::register(&app, "scribe").await;

    let response = post_json_auth(&app, "/api/v1/notes", json!({ "title": "Session 1" }), &token).await;
    let note = body_json(response).await;
    let uri = format!("/api/v1/notes/{}", note["id"]);

    let response = put_json_auth(&app, &uri, json!({ "title": "Session 1 recap", "content": "Met the party." }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Session 1 recap");

    let response = get_auth(&app, "/api/v1/notes", &token).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = delete_auth(&app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(&app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notes_are_private() {
    let app = common::build_test_app();
    let alice = common::register(&app, "alice").await;
    let bob = common::register(&app, "bob").await;

    let response = post_json_auth(&app, "/api/v1/notes", json!({ "title": "Secret" }), &alice).await;
    let uri = format!("/api/v1/notes/{}", body_json(response).await["id"]);

    assert_eq!(get_auth(&app, &uri, &bob).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        put_json_auth(&app, &uri, json!({ "title": "Mine now" }), &bob).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(delete_auth(&app, &uri, &bob).await.status(), StatusCode::NOT_FOUND);

    let response = get_auth(&app, "/api/v1/notes", &bob).await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}
