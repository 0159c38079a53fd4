mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use matempraktika::{AppState, router};
use serde_json::json;

use common::{STUB_TOKEN, StubRemoteApi, request, student_user, teacher_user, test_state};

fn student_stub() -> Arc<StubRemoteApi> {
    Arc::new(StubRemoteApi::default().with_account(
        "student@example.com",
        "secret",
        student_user(),
    ))
}

#[tokio::test]
async fn valid_login_stores_the_session() {
    let app = router(test_state(student_stub()).await);

    let (status, body) = request(
        &app,
        "POST",
        "/auth/login",
        Some(json!({ "email": "student@example.com", "password": "secret" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"], STUB_TOKEN);
    assert_eq!(body["user"]["role"], "student");

    let (status, session) = request(&app, "GET", "/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["user_id"], 3);
    assert_eq!(session["token"], STUB_TOKEN);
    assert_eq!(session["role"], "student");

    let (_, notices) = request(&app, "GET", "/notifications", None).await;
    assert_eq!(notices[0]["title"], "Вход выполнен");
}

#[tokio::test]
async fn invalid_credentials_leave_state_unauthenticated() {
    let app = router(test_state(student_stub()).await);

    let (status, _) = request(
        &app,
        "POST",
        "/auth/login",
        Some(json!({ "email": "student@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, session) = request(&app, "GET", "/session", None).await;
    assert!(session.is_null());

    let (_, notices) = request(&app, "GET", "/notifications", None).await;
    assert_eq!(notices[0]["kind"], "error");
    assert_eq!(notices[0]["title"], "Ошибка входа");
}

#[tokio::test]
async fn session_survives_a_restart() {
    let state = test_state(student_stub()).await;
    let app = router(state.clone());

    common::login_as(&app, "student@example.com", "secret").await;

    // A fresh state over the same database models an app restart.
    let restarted = router(AppState::new(state.db.clone(), student_stub()));
    let (status, session) = request(&restarted, "GET", "/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["user_id"], 3);
}

#[tokio::test]
async fn logout_clears_the_session() {
    let app = router(test_state(student_stub()).await);
    common::login_as(&app, "student@example.com", "secret").await;

    let (status, _) = request(&app, "POST", "/auth/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, session) = request(&app, "GET", "/session", None).await;
    assert!(session.is_null());
}

#[tokio::test]
async fn registration_creates_a_session() {
    let app = router(test_state(Arc::new(StubRemoteApi::default())).await);

    let (status, body) = request(
        &app,
        "POST",
        "/auth/register",
        Some(json!({
            "email": "new@example.com",
            "password": "secret",
            "role": "student",
            "full_name": "Пётр Сидоров"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "new@example.com");

    let (_, session) = request(&app, "GET", "/session", None).await;
    assert_eq!(session["user_id"], 100);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let app = router(
        test_state(Arc::new(StubRemoteApi::default().with_account(
            "teacher@example.com",
            "secret",
            teacher_user(),
        )))
        .await,
    );

    let (status, _) = request(
        &app,
        "POST",
        "/auth/register",
        Some(json!({
            "email": "teacher@example.com",
            "password": "secret",
            "role": "teacher"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, session) = request(&app, "GET", "/session", None).await;
    assert!(session.is_null());
}
