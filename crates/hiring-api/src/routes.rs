//! API routes.

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::admin::{clear_storage, reset_data};
use crate::handlers::auth::{login, logout, me, status};
use crate::handlers::candidates::{
    create_candidate, delete_candidate, get_candidate, list_candidates, update_candidate,
};
use crate::handlers::jobs::{
    create_job, delete_job, get_job, get_job_by_slug, list_jobs, update_job,
};
use crate::handlers::web::{
    dashboard, login_form, login_submit, logout_submit, not_found, unauthorized,
};
use crate::handlers::{health, ready};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, hide_internal_errors, request_id, request_logging, security_headers,
};
use crate::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let auth_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/auth/status", get(status));

    let job_routes = Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/slug/:slug", get(get_job_by_slug))
        .route("/jobs/:id", get(get_job).patch(update_job).delete(delete_job));

    let candidate_routes = Router::new()
        .route("/candidates", get(list_candidates).post(create_candidate))
        .route(
            "/candidates/:id",
            get(get_candidate)
                .patch(update_candidate)
                .delete(delete_candidate),
        );

    let admin_routes = Router::new()
        .route("/admin/reset", post(reset_data))
        .route("/admin/storage", delete(clear_storage));

    let api_routes = Router::new()
        .merge(auth_routes)
        .merge(job_routes)
        .merge(candidate_routes)
        .merge(admin_routes);

    let page_routes = Router::new()
        .route("/", get(dashboard))
        .route("/login", get(login_form).post(login_submit))
        .route("/logout", post(logout_submit))
        .route("/unauthorized", get(unauthorized));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), hide_internal_errors))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
