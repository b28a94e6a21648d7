//! Prometheus metrics for the API server.

use std::sync::LazyLock;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use regex_lite::Regex;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "hiring_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "hiring_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "hiring_http_requests_in_flight";

    // Auth metrics
    pub const LOGIN_ATTEMPTS_TOTAL: &str = "hiring_login_attempts_total";
    pub const SESSIONS_EXPIRED_TOTAL: &str = "hiring_sessions_expired_total";

    // Data metrics
    pub const ENTITY_MUTATIONS_TOTAL: &str = "hiring_entity_mutations_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a login attempt (`success` or `failure`).
pub fn record_login(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::LOGIN_ATTEMPTS_TOTAL, &labels).increment(1);
}

/// Record a session purged on expiry.
pub fn record_session_expired() {
    counter!(names::SESSIONS_EXPIRED_TOTAL).increment(1);
}

/// Record a create/update/delete on a job or candidate.
pub fn record_mutation(entity: &str, action: &str) {
    let labels = [
        ("entity", entity.to_string()),
        ("action", action.to_string()),
    ];
    counter!(names::ENTITY_MUTATIONS_TOTAL, &labels).increment(1);
}

static JOB_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/job_[A-Za-z0-9_]+").expect("valid regex"));
static CANDIDATE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/cand_[A-Za-z0-9_]+").expect("valid regex"));
static JOB_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/jobs/slug/[^/]+").expect("valid regex"));

/// Sanitize path for metrics labels (remove IDs and slugs).
fn sanitize_path(path: &str) -> String {
    let path = JOB_SLUG.replace_all(path, "/jobs/slug/:slug");
    let path = JOB_ID.replace_all(&path, "/:job_id");
    let path = CANDIDATE_ID.replace_all(&path, "/:candidate_id");
    path.to_string()
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path() {
        assert_eq!(
            sanitize_path("/api/jobs/job_20251001_0001"),
            "/api/jobs/:job_id"
        );
        assert_eq!(
            sanitize_path("/api/candidates/cand_20251002_0001"),
            "/api/candidates/:candidate_id"
        );
        assert_eq!(
            sanitize_path("/api/jobs/slug/frontend-developer"),
            "/api/jobs/slug/:slug"
        );
        assert_eq!(sanitize_path("/login"), "/login");
    }
}
