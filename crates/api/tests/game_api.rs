//! HTTP-level tests for derived stats and in-session hit point / death save changes.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_character, get_auth, post_json_auth};
use serde_json::{json, Value};

async fn setup() -> (axum::Router, String, String) {
    let app = common::build_test_app();
    let token = common::register(&app, "tordek").await;
    let c = create_character(
        &app,
        &token,
        json!({
            "name": "Tordek",
            "constitution": 14,
            "hitPoints": 12,
            "maxHitPoints": 20,
            "classes": [
                { "index": "fighter", "name": "Fighter", "levels": 5 },
                { "index": "rogue", "name": "Rogue", "levels": 2 }
            ]
        }),
    )
    .await;
    let base = format!("/api/v1/characters/{}", c["id"]);
    (app, token, base)
}

async fn post(app: &axum::Router, uri: &str, body: Value, token: &str) -> Value {
    let response = post_json_auth(app, uri, body, token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn stats_are_derived_from_the_sheet() {
    let (app, token, base) = setup().await;

    let response = get_auth(&app, &format!("{base}/stats"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["totalLevel"], 7);
    assert_eq!(json["proficiencyBonus"], 3);
    // Fighter 1: 10 + 2; fighter 2-5: 4 * (6 + 2); rogue 1-2: 2 * (5 + 2).
    assert_eq!(json["computedMaxHitPoints"], 58);
    assert_eq!(json["abilityModifiers"]["constitution"], 2);
    assert_eq!(json["abilityModifiers"]["strength"], 0);
    assert_eq!(json["isDead"], false);
}

#[tokio::test]
async fn damage_floors_at_zero() {
    let (app, token, base) = setup().await;

    let json = post(&app, &format!("{base}/damage"), json!({ "amount": 5 }), &token).await;
    assert_eq!(json["hitPoints"], 7);

    let json = post(&app, &format!("{base}/damage"), json!({ "amount": 50 }), &token).await;
    assert_eq!(json["hitPoints"], 0);
}

#[tokio::test]
async fn negative_amount_is_rejected() {
    let (app, token, base) = setup().await;

    let response = post_json_auth(&app, &format!("{base}/damage"), json!({ "amount": -3 }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"][0]["field"], "amount");
}

#[tokio::test]
async fn healing_caps_at_max() {
    let (app, token, base) = setup().await;

    let json = post(&app, &format!("{base}/heal"), json!({ "amount": 100 }), &token).await;
    assert_eq!(json["hitPoints"], 20);
}

#[tokio::test]
async fn healing_at_integer_limit_stays_at_max() {
    let app = common::build_test_app();
    let token = common::register(&app, "colossus").await;
    let c = create_character(
        &app,
        &token,
        json!({ "name": "Colossus", "hitPoints": i32::MAX, "maxHitPoints": i32::MAX }),
    )
    .await;
    let base = format!("/api/v1/characters/{}", c["id"]);

    let json = post(&app, &format!("{base}/heal"), json!({ "amount": 1 }), &token).await;
    assert_eq!(json["hitPoints"], i32::MAX);
}

#[tokio::test]
async fn death_saves_accumulate_and_healing_resets_them() {
    let (app, token, base) = setup().await;
    let saves = format!("{base}/death-saves");

    post(&app, &format!("{base}/damage"), json!({ "amount": 12 }), &token).await;
    post(&app, &saves, json!({ "outcome": "success" }), &token).await;
    let json = post(&app, &saves, json!({ "outcome": "critical_failure" }), &token).await;
    assert_eq!(json["deathSaveSuccesses"], 1);
    assert_eq!(json["deathSaveFailures"], 2);

    let json = post(&app, &format!("{base}/heal"), json!({ "amount": 3 }), &token).await;
    assert_eq!(json["hitPoints"], 3);
    assert_eq!(json["deathSaveSuccesses"], 0);
    assert_eq!(json["deathSaveFailures"], 0);
}

#[tokio::test]
async fn third_failure_marks_character_dead() {
    let (app, token, base) = setup().await;
    let saves = format!("{base}/death-saves");

    post(&app, &saves, json!({ "outcome": "critical_failure" }), &token).await;
    let json = post(&app, &saves, json!({ "outcome": "failure" }), &token).await;
    assert_eq!(json["deathSaveFailures"], 3);

    let response = get_auth(&app, &format!("{base}/stats"), &token).await;
    assert_eq!(body_json(response).await["isDead"], true);

    let json = post(&app, &saves, json!({ "outcome": "reset" }), &token).await;
    assert_eq!(json["deathSaveFailures"], 0);
}

#[tokio::test]
async fn game_endpoints_respect_ownership() {
    let (app, _token, base) = setup().await;
    let intruder = common::register(&app, "intruder").await;

    let response = post_json_auth(&app, &format!("{base}/damage"), json!({ "amount": 1 }), &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(&app, &format!("{base}/stats"), &intruder).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
