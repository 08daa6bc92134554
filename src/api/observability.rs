//! Per-request tracing span, access log and HTTP metrics.

use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::api::AppState;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// GET /metrics
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Rejected,
    Failed,
}

impl Outcome {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::Failed
        } else if status.is_client_error() {
            Self::Rejected
        } else {
            Self::Success
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }
}

/// What is known about a request before it is handled.
struct RequestInfo {
    id: String,
    method: String,
    path: String,
    route: Option<String>,
    origin: Option<String>,
}

impl RequestInfo {
    fn capture(req: &Request) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            route: req
                .extensions()
                .get::<MatchedPath>()
                .map(|mp| mp.as_str().to_string()),
            origin: req
                .headers()
                .get(header::ORIGIN)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string),
        }
    }

    /// Unmatched requests share one label value.
    fn metrics_route(&self) -> &str {
        self.route.as_deref().unwrap_or("unmatched")
    }

    fn record_metrics(&self, status: StatusCode, elapsed: Duration) {
        let labels = [
            ("method", self.method.clone()),
            ("path", self.metrics_route().to_string()),
            ("status", status.as_u16().to_string()),
        ];

        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());
    }
}

/// Runs the request inside a `request` span, then logs "Request finished",
/// records `http_requests_total` and `http_request_duration_seconds`, and
/// echoes the request id in `x-request-id`.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let info = RequestInfo::capture(&req);

    let span = info_span!(
        "request",
        request_id = %info.id,
        method = %info.method,
        path = %info.path,
        route = info.route.clone(),
        user_id = tracing::field::Empty,
    );

    async move {
        let mut response = next.run(req).await;
        let elapsed = started.elapsed();
        let status = response.status();

        info.record_metrics(status, elapsed);

        info!(
            status_code = status.as_u16(),
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            origin = info.origin.as_deref().unwrap_or("-"),
            outcome = Outcome::of(status).as_str(),
            "Request finished"
        );

        if let Ok(value) = HeaderValue::from_str(&info.id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, routing::get};
    use tower::ServiceExt;

    #[test]
    fn outcome_follows_status_class() {
        assert_eq!(Outcome::of(StatusCode::OK), Outcome::Success);
        assert_eq!(Outcome::of(StatusCode::NO_CONTENT), Outcome::Success);
        assert_eq!(Outcome::of(StatusCode::FORBIDDEN), Outcome::Rejected);
        assert_eq!(Outcome::of(StatusCode::NOT_ACCEPTABLE), Outcome::Rejected);
        assert_eq!(
            Outcome::of(StatusCode::INTERNAL_SERVER_ERROR),
            Outcome::Failed
        );
    }

    #[tokio::test]
    async fn response_carries_request_id() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(axum::middleware::from_fn(logging_middleware));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }
}
