//! Integration tests for the bot protocol over HTTP.
//!
//! Tests routing, form decoding, fold fallbacks and request correlation.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use poker_player::{DecisionConfig, Player, bot::RngSource};
use pp_player::api::{AppState, create_router, request_id::REQUEST_ID_HEADER};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt; // For `oneshot` method

/// Helper to create test server sharing its player with the test
fn create_test_server() -> (axum::Router, Arc<Player>) {
    let player = Arc::new(Player::with_rng(
        DecisionConfig::default(),
        RngSource::seeded(11),
    ));
    let app = create_router(AppState {
        player: player.clone(),
    });
    (app, player)
}

/// Encode form fields the way the host posts them
fn form(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}

fn post(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Three-handed pre-flop table, acting on seat 0 with pocket aces
fn game_state() -> serde_json::Value {
    json!({
        "tournament_id": "550d1d68cd7bd10003000003",
        "game_id": "550da1cb2d909006e90004b1",
        "round": 0,
        "bet_index": 2,
        "small_blind": 10,
        "current_buy_in": 20,
        "pot": 30,
        "minimum_raise": 20,
        "dealer": 2,
        "orbits": 0,
        "in_action": 0,
        "players": [
            {
                "id": 0, "name": "Us", "status": "active", "version": "1.0",
                "stack": 1000, "bet": 0,
                "hole_cards": [
                    {"rank": "A", "suit": "spades"},
                    {"rank": "A", "suit": "hearts"}
                ]
            },
            {"id": 1, "name": "Bob", "status": "active", "version": "1.0", "stack": 990, "bet": 10},
            {"id": 2, "name": "Chuck", "status": "active", "version": "1.0", "stack": 980, "bet": 20}
        ],
        "community_cards": []
    })
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check_endpoint() {
    let (app, _) = create_test_server();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

// ============================================================================
// Protocol Tests
// ============================================================================

#[tokio::test]
async fn test_check_action() {
    let (app, _) = create_test_server();
    let (status, body) = send(app, post(form(&[("action", "check")]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_version_action() {
    let (app, _) = create_test_server();
    let (status, body) = send(app, post(form(&[("action", "version")]))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("poker_player "), "got {body}");
}

#[tokio::test]
async fn test_bet_request_action() {
    let (app, player) = create_test_server();
    let state = game_state().to_string();

    let (status, body) = send(
        app,
        post(form(&[("action", "bet_request"), ("game_state", &state)])),
    )
    .await;

    // AA pre-flop: to_call 20 + 2 * minimum_raise 20
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "60");
    assert_eq!(player.profiles().len(), 2);
}

#[tokio::test]
async fn test_bad_bet_request_folds() {
    let (app, player) = create_test_server();

    for state in ["", "{not json", "{\"game_id\": \"g\"}"] {
        let (status, body) = send(
            app.clone(),
            post(form(&[("action", "bet_request"), ("game_state", state)])),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "0");
    }

    let (status, body) = send(app, post(form(&[("action", "bet_request")]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "0");
    assert!(player.profiles().is_empty());
}

#[tokio::test]
async fn test_showdown_action() {
    let (app, player) = create_test_server();

    let mut state = game_state();
    state["players"][1]["hole_cards"] = json!([
        {"rank": "K", "suit": "clubs"},
        {"rank": "K", "suit": "diamonds"}
    ]);
    state["players"][1]["amount_won"] = json!(0);
    state["players"][0]["amount_won"] = json!(60);

    let (status, body) = send(
        app,
        post(form(&[
            ("action", "showdown"),
            ("game_state", &state.to_string()),
        ])),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    let bob = player.profiles().profiles_for_game("550da1cb2d909006e90004b1");
    assert_eq!(bob.len(), 1);
    assert_eq!(bob[0].showdowns, 1);
}

#[tokio::test]
async fn test_bad_showdown_is_rejected() {
    let (app, _) = create_test_server();
    let (status, body) = send(
        app,
        post(form(&[("action", "showdown"), ("game_state", "[]")])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("game_state"), "got {body}");
}

#[tokio::test]
async fn test_unknown_action_is_rejected() {
    let (app, _) = create_test_server();

    let (status, body) = send(app.clone(), post(form(&[("action", "fold")]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("fold"));

    let (status, _) = send(app, post(String::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Request ID Tests
// ============================================================================

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (app, _) = create_test_server();

    let mut request = post(form(&[("action", "check")]));
    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, "hand-7".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "hand-7"
    );
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let (app, _) = create_test_server();

    let response = app.oneshot(post(form(&[("action", "check")]))).await.unwrap();
    let request_id = response.headers().get(REQUEST_ID_HEADER).unwrap();
    assert_eq!(request_id.len(), 36);
}
