//! Rendered page and guard scenarios.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};

use common::*;

#[tokio::test]
async fn test_admin_login_lands_on_dashboard() {
    let (app, _) = test_app();

    let response = send(
        &app,
        form_post("/login", "email=admin%40rakamin.com&password=admin123&redirect=%2F"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response).unwrap();
    assert!(cookie.starts_with("hiring_session=token_"));

    let response = send(&app, get_with_cookie("/", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<h1>Dashboard</h1>"));
    assert!(html.contains("admin@rakamin.com"));
    assert!(html.contains("&quot;role&quot;: &quot;admin&quot;"));
    assert!(html.contains("Jobs: 3"));
    assert!(!html.contains("admin123"));
}

#[tokio::test]
async fn test_unauthenticated_dashboard_redirects_to_login() {
    let (app, _) = test_app();

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirect=/");

    let response = send(&app, get("/login?redirect=/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("name=\"redirect\" value=\"/\""));
}

#[tokio::test]
async fn test_applicant_is_sent_to_unauthorized() {
    let (app, _) = test_app();

    let response = send(
        &app,
        form_post("/login", "email=applicant%40rakamin.com&password=applicant123"),
    )
    .await;
    let cookie = session_cookie(&response).unwrap();

    let response = send(&app, get_with_cookie("/", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/unauthorized");

    let response = send(&app, get("/unauthorized")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("href=\"/login\""));
}

#[tokio::test]
async fn test_wrong_password_rerenders_form() {
    let (app, store) = test_app();

    let response = send(
        &app,
        form_post("/login", "email=admin%40rakamin.com&password=nope"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
    let html = body_string(response).await;
    assert!(html.contains("Invalid email or password"));
    assert!(html.contains("value=\"admin@rakamin.com\""));

    assert!(store.session.get().await.unwrap().is_none());
}

#[tokio::test]
async fn test_form_validation_messages() {
    let (app, _) = test_app();

    let response = send(&app, form_post("/login", "email=&password=")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("Email is required"));
    assert!(html.contains("Password is required"));

    let response = send(&app, form_post("/login", "email=admin&password=admin123")).await;
    let html = body_string(response).await;
    assert!(html.contains("Please enter a valid email"));
}

#[tokio::test]
async fn test_external_redirect_is_ignored() {
    let (app, _) = test_app();

    let response = send(
        &app,
        form_post(
            "/login",
            "email=admin%40rakamin.com&password=admin123&redirect=https%3A%2F%2Fevil.example",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (app, _) = test_app();

    let response = send(
        &app,
        form_post("/login", "email=admin%40rakamin.com&password=admin123"),
    )
    .await;
    let cookie = session_cookie(&response).unwrap();

    let mut request = form_post("/logout", "");
    request
        .headers_mut()
        .insert("cookie", cookie.parse().unwrap());
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(session_cookie(&response).unwrap().starts_with("hiring_session="));

    let response = send(&app, get_with_cookie("/", &cookie)).await;
    assert_eq!(location(&response), "/login?redirect=/");
}

#[tokio::test]
async fn test_expired_session_redirects_and_is_purged() {
    let (app, store) = test_app();

    let response = send(
        &app,
        form_post("/login", "email=admin%40rakamin.com&password=admin123"),
    )
    .await;
    let cookie = session_cookie(&response).unwrap();

    let mut session = store.session.get().await.unwrap().unwrap();
    session.expires_at = Utc::now() - Duration::seconds(5);
    store.session.save(&session).await.unwrap();

    let response = send(&app, get_with_cookie("/", &cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?redirect=/");
    assert!(store.session.get().await.unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let (app, _) = test_app();

    let response = send(&app, get("/careers/unknown")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_string(response).await;
    assert!(html.contains("Page not found"));
    assert!(html.contains("/careers/unknown"));
}

#[tokio::test]
async fn test_storage_failure_renders_error_page() {
    let app = broken_app("development");

    let response = send(&app, get_with_cookie("/", "hiring_session=token_1_abc")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let html = body_string(response).await;
    assert!(html.contains("Something went wrong"));
    assert!(html.contains("disk unavailable"));
}

#[tokio::test]
async fn test_error_page_hides_detail_in_production() {
    let app = broken_app("production");

    let response = send(&app, get_with_cookie("/", "hiring_session=token_1_abc")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let html = body_string(response).await;
    assert!(html.contains("Something went wrong"));
    assert!(html.contains("An internal error occurred"));
    assert!(!html.contains("disk unavailable"));
}
