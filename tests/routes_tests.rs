// HTTP route tests for Lume Explore

use actix_web::{http::StatusCode, test, web, App};
use lume_explore::config::ExploreSettings;
use lume_explore::routes::{configure_routes, explore::AppState};
use lume_explore::services::InMemoryBackend;
use serde_json::{json, Value};
use std::sync::Arc;

fn create_state() -> AppState {
    AppState::new(Arc::new(InMemoryBackend::new()), ExploreSettings::default())
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let state = create_state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_likes_flow_over_http() {
    let state = create_state();
    let app = app!(state);

    for (actor, ts) in [("user1", 1633036800u64), ("user2", 1633040400u64)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/explore/likes")
            .set_json(json!({
                "recipientUserId": "recipient123",
                "actorUserId": actor,
                "unixTimestamp": ts,
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["recorded"], true);
        assert_eq!(body["unixTimestamp"], ts);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/explore/liked-you?userId=recipient123")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body,
        json!({"likers": [
            {"actorId": "user2", "unixTimestamp": 1633040400u64},
            {"actorId": "user1", "unixTimestamp": 1633036800u64},
        ]})
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/explore/liked-you?userId=recipient123&offset=1&limit=5")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["likers"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["likers"][0]["actorId"], "user1");

    let req = test::TestRequest::get()
        .uri("/api/v1/explore/liked-you/count?userId=recipient123")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 2);

    // recipient123 likes user1 back through the like path first
    let req = test::TestRequest::post()
        .uri("/api/v1/explore/likes")
        .set_json(json!({
            "recipientUserId": "user1",
            "actorUserId": "recipient123",
            "unixTimestamp": 1633044000u64,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri("/api/v1/explore/decision")
        .set_json(json!({
            "actorUserId": "recipient123",
            "recipientUserId": "user1",
            "likedRecipient": true,
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["mutualLikes"], true);

    let req = test::TestRequest::get()
        .uri("/api/v1/explore/liked-you/new?userId=recipient123")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["likers"], json!([{"actorId": "user2", "unixTimestamp": 1633040400u64}]));
}

#[actix_web::test]
async fn test_decision_without_own_like_is_not_mutual() {
    let state = create_state();
    let app = app!(state);

    // Only user1 liked recipient123
    state.engine.record_like("recipient123", "user1", Some(10)).await.unwrap();

    let req = test::TestRequest::put()
        .uri("/api/v1/explore/decision")
        .set_json(json!({
            "actorUserId": "recipient123",
            "recipientUserId": "user1",
            "likedRecipient": true,
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["mutualLikes"], false);
}

#[actix_web::test]
async fn test_new_likers_after_mutual_like_back() {
    let state = create_state();
    let app = app!(state);

    state.engine.record_like("r", "u1", Some(1)).await.unwrap();
    state.engine.record_like("r", "u2", Some(2)).await.unwrap();
    // r likes u1 back
    state.engine.record_like("u1", "r", Some(3)).await.unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/explore/liked-you/new?userId=r")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["likers"], json!([{"actorId": "u2", "unixTimestamp": 2}]));
}

#[actix_web::test]
async fn test_empty_user_id_rejected() {
    let state = create_state();
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/explore/liked-you/count?userId=")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_limit_is_capped() {
    let state = AppState::new(
        Arc::new(InMemoryBackend::new()),
        ExploreSettings {
            default_limit: 10,
            max_limit: 3,
            decision_ttl_secs: None,
        },
    );
    let app = app!(state);

    for i in 0..5u64 {
        state.engine.record_like("r", &format!("u{}", i), Some(i)).await.unwrap();
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/explore/liked-you?userId=r&limit=50")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["likers"].as_array().map(Vec::len), Some(3));
}
