//! Shared helpers for router tests.

#![allow(dead_code)]

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use hiring_api::{create_router, ApiConfig, AppState};
use hiring_store::{HiringStore, KeyValueStore, Latency, StoreError, StoreResult};

/// Router over a fresh in-memory store with no artificial delay.
pub fn test_app() -> (Router, HiringStore) {
    let store = HiringStore::in_memory();
    let state = AppState::with_store(ApiConfig::default(), store.clone());
    (create_router(state, None), store)
}

/// Backend whose every call fails with an I/O error.
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Io(io::Error::other("disk unavailable")))
    }

    async fn set(&self, _key: &str, _value: String) -> StoreResult<()> {
        Err(StoreError::Io(io::Error::other("disk unavailable")))
    }

    async fn remove(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::Io(io::Error::other("disk unavailable")))
    }
}

/// Router over [`BrokenStore`], in the given environment.
pub fn broken_app(environment: &str) -> Router {
    let store = HiringStore::with_backend(Arc::new(BrokenStore), Latency::none());
    let config = ApiConfig {
        environment: environment.to_string(),
        ..ApiConfig::default()
    };
    create_router(AppState::with_store(config, store), None)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// `name=value` part of the first `Set-Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|s| s.trim().to_string())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Log in through the JSON API and return the session token.
pub async fn api_login(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        ),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    body["data"]["token"].as_str().unwrap().to_string()
}
