use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use chrono::Utc;
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use idle_logout_api::session::{
    IdleSessionTracker, LAST_ACTIVE_KEY, MemoryUserStore, TrackerConfig, UserStore, Verdict,
};
use idle_logout_api::{AppState, handlers, middleware, models::AppConfig};

fn build_state(idle_time: &str) -> (Arc<MemoryUserStore>, AppState) {
    let store = Arc::new(MemoryUserStore::new());
    let tracker = IdleSessionTracker::new(
        store.clone(),
        TrackerConfig::from_raw(Some(idle_time), Some("Idle timeout.\nPlease sign in again.")),
    );
    let state = AppState::new(tracker, Arc::new(AppConfig::default()));
    (store, state)
}

/// The gateway routes, wired the same way the server binary wires them.
fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route(
            "/api/v1/auth/logout",
            post(handlers::auth::logout)
                .layer(axum_middleware::from_fn(middleware::auth::auth_middleware)),
        )
        .route(
            "/api/v1/user/profile",
            get(handlers::user::get_profile)
                .layer(axum_middleware::from_fn_with_state(
                    state.clone(),
                    middleware::idle::idle_guard,
                ))
                .layer(axum_middleware::from_fn(middleware::auth::auth_middleware)),
        )
        .with_state(state)
}

async fn login(app: &Router, user_id: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!(r#"{{"user_id":"{}"}}"#, user_id)))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    json["token"].as_str().unwrap().to_string()
}

async fn get_profile(app: &Router, token: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/user/profile")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// The end-to-end sliding-window scenario, at the tracker level:
/// authenticate at t=1000, check at t=2799 (allowed, window slides),
/// check at t=4600 (2799 + 1800 = 4599 < 4600: forced logout).
#[tokio::test]
async fn test_sliding_window_timeout_scenario() {
    let store = Arc::new(MemoryUserStore::new());
    let tracker = IdleSessionTracker::new(store.clone(), TrackerConfig::from_raw(Some("1800"), None));

    tracker.on_authenticate_at("user-123", 1000).await.unwrap();

    assert_eq!(
        tracker.check_activity_at("user-123", 2799).await.unwrap(),
        Verdict::Allow
    );
    assert_eq!(
        store.get("user-123", LAST_ACTIVE_KEY).await.unwrap(),
        Some("2799".to_string())
    );

    assert_eq!(
        tracker.check_activity_at("user-123", 4600).await.unwrap(),
        Verdict::ForceLogout
    );
    assert!(store.get("user-123", LAST_ACTIVE_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_login_then_profile_is_allowed() {
    let (store, state) = build_state("1800");
    let app = build_app(state);

    let token = login(&app, "user-123").await;

    // Login seeded the activity record.
    assert!(store.get("user-123", LAST_ACTIVE_KEY).await.unwrap().is_some());

    let response = get_profile(&app, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["user_id"], "user-123");
}

#[tokio::test]
async fn test_idle_session_is_redirected_to_login() {
    let (store, state) = build_state("1800");
    let app = build_app(state.clone());

    let token = login(&app, "user-123").await;

    // Age the record past the threshold.
    state
        .tracker
        .on_authenticate_at("user-123", Utc::now().timestamp() - 4000)
        .await
        .unwrap();

    let response = get_profile(&app, &token).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login?idle=1"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "session_idle");
    assert_eq!(json["message"], "Idle timeout.<br />\nPlease sign in again.");

    // Detection and cleanup are atomic: the record is already gone.
    assert!(store.get("user-123", LAST_ACTIVE_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_logout_clears_record_and_next_check_reseeds() {
    let (store, state) = build_state("1800");
    let app = build_app(state);

    let token = login(&app, "user-123").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/logout")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.get("user-123", LAST_ACTIVE_KEY).await.unwrap().is_none());

    // The token is still honored upstream, so the untracked user is
    // treated leniently: allowed, with a fresh record.
    let response = get_profile(&app, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.get("user-123", LAST_ACTIVE_KEY).await.unwrap().is_some());
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let (_, state) = build_state("1800");
    let app = build_app(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/user/profile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_empty_user_id() {
    let (_, state) = build_state("1800");
    let app = build_app(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"user_id":"  "}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unusable_idle_setting_falls_back_to_default() {
    let (_, state) = build_state("definitely-not-a-number");

    assert_eq!(state.tracker.idle_time_secs(), 1800);
}
