//! HTTP middleware for the floor-plan services.
//!
//! - [`RequestId`] and [`extract_or_generate_request_id`]: correlation IDs
//! - [`MetricsLayer`]: request span, HTTP metrics and request-ID propagation
//! - [`cors_layer`]: CORS policy for browser map clients
//!
//! # Request ID Propagation
//!
//! The `X-Request-ID` header is used when present, otherwise a UUID v7 is
//! generated. `MetricsLayer` writes the chosen ID back onto the request so
//! handlers see the same value, and echoes it on the response.
//!
//! # Metrics Recording
//!
//! - `http_requests_total`: Counter by method, path, status bucket
//! - `http_request_duration_seconds`: Histogram by method, path
//! - `http_request_size_bytes`: Histogram by method, path
//! - `http_response_size_bytes`: Histogram by method, path

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use http::{header, HeaderMap, HeaderValue, Method, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info_span, Span};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Newtype wrapper for request correlation IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new time-sortable UUID v7 request ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Extract the request ID from headers or generate a new UUID v7.
///
/// Empty or non-UTF-8 `X-Request-ID` values are replaced by a generated ID.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.trim().is_empty())
        .map(RequestId::from)
        .unwrap_or_else(RequestId::generate)
}

/// Build the CORS layer for `allow_origin` (`*` allows any origin).
///
/// Only GET, POST and OPTIONS with a `Content-Type` header are permitted.
/// An origin that is not a valid header value falls back to allowing any
/// origin, with a warning.
pub fn cors_layer(allow_origin: &str) -> CorsLayer {
    let origin = if allow_origin.trim() == "*" {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(allow_origin.trim()) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!(origin = %allow_origin, "invalid CORS origin, allowing any");
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Strip the query string so metric labels keep a bounded cardinality.
pub fn normalize_path(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

fn status_bucket(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

fn content_length(headers: &HeaderMap) -> Option<f64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<f64>().ok())
}

fn record_completion(method: &str, path: &str, status_label: &'static str, duration_secs: f64) {
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_label
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

// =============================================================================
// MetricsLayer - Tower middleware for HTTP metrics
// =============================================================================

/// Tower layer that wraps each request in a span and records HTTP metrics.
#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware { inner }
    }
}

/// Middleware service produced by [`MetricsLayer`].
#[derive(Debug, Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: http_body::Body + Send + 'static,
    ResBody: http_body::Body + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = MetricsFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = normalize_path(req.uri().path()).to_string();

        if let Some(size) = content_length(req.headers()) {
            metrics::histogram!(
                "http_request_size_bytes",
                "method" => method.clone(),
                "path" => path.clone()
            )
            .record(size);
        }

        let request_id = extract_or_generate_request_id(req.headers());
        if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
            req.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );

        {
            let _enter = span.enter();
            tracing::info!("handling request");
        }

        let future = self.inner.call(req);

        MetricsFuture {
            inner: future,
            start,
            method,
            path,
            request_id,
            span,
        }
    }
}

pin_project! {
    /// Future wrapper that records metrics on completion.
    pub struct MetricsFuture<F> {
        #[pin]
        inner: F,
        start: Instant,
        method: String,
        path: String,
        request_id: RequestId,
        span: Span,
    }
}

impl<F, ResBody, E> Future for MetricsFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    ResBody: http_body::Body,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _enter = this.span.enter();

        let mut result = match this.inner.poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(result) => result,
        };

        let duration_secs = this.start.elapsed().as_secs_f64();
        let latency_ms = duration_secs * 1000.0;

        match &mut result {
            Ok(response) => {
                let status = response.status().as_u16();
                record_completion(this.method, this.path, status_bucket(status), duration_secs);

                if let Some(size) = content_length(response.headers()) {
                    metrics::histogram!(
                        "http_response_size_bytes",
                        "method" => this.method.clone(),
                        "path" => this.path.clone()
                    )
                    .record(size);
                }

                if let Ok(value) = HeaderValue::from_str(this.request_id.as_str()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }

                tracing::info!(status, latency_ms, "request completed");
            }
            Err(_) => {
                record_completion(this.method, this.path, "5xx", duration_secs);
                tracing::error!(latency_ms, "request failed");
            }
        }

        Poll::Ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_generate() {
        let id1 = RequestId::generate();
        let id2 = RequestId::generate();

        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), 36);
    }

    #[test]
    fn test_extract_request_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Request-ID", HeaderValue::from_static("test-123"));

        let id = extract_or_generate_request_id(&headers);
        assert_eq!(id.as_str(), "test-123");
    }

    #[test]
    fn test_extract_request_id_generates_when_blank() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("  "));

        let id = extract_or_generate_request_id(&headers);
        assert_eq!(id.as_str().len(), 36);

        let id = extract_or_generate_request_id(&HeaderMap::new());
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/floorplan/path"), "/floorplan/path");
        assert_eq!(
            normalize_path("/floorplan/path?start=entrance&end=stairs"),
            "/floorplan/path"
        );
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn test_status_bucket() {
        assert_eq!(status_bucket(200), "2xx");
        assert_eq!(status_bucket(301), "3xx");
        assert_eq!(status_bucket(422), "4xx");
        assert_eq!(status_bucket(503), "5xx");
        assert_eq!(status_bucket(99), "other");
    }

    #[test]
    fn test_cors_layer_accepts_origins() {
        // construction must not panic for either form
        let _any = cors_layer("*");
        let _exact = cors_layer("https://map.example.org");
        let _fallback = cors_layer("bad\norigin");
    }
}
