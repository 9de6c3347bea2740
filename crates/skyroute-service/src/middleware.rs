//! Request correlation and HTTP telemetry.
//!
//! [`TelemetryLayer`] wraps the router. For every request it:
//! - picks a [`RequestId`] (the caller's `X-Request-ID`, else a UUID v7),
//!   stores it in the request extensions and echoes it on the response;
//! - opens a `request` span carrying that ID;
//! - records `http_requests_total`, `http_request_duration_seconds` and the
//!   request/response body size histograms, labelled by the matched route
//!   template so unknown paths collapse into `unmatched`.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::extract::{FromRequestParts, MatchedPath};
use axum::http::{request::Parts, HeaderMap, HeaderValue, Request, Response};
use http_body::Body;
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Route label for requests that matched no route.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Correlation ID of one API call, used as the `instance` of problem bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Fresh time-sortable UUID v7.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// The caller's `X-Request-ID`, or a generated one when it is absent,
    /// blank or not valid header text.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Self(id.to_string()))
            .unwrap_or_else(Self::generate)
    }

    /// The ID as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let stored = parts.extensions.get::<RequestId>().cloned();
        Ok(stored.unwrap_or_else(|| RequestId::from_headers(&parts.headers)))
    }
}

/// `2xx`..`5xx` class of a status code.
pub fn status_class(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// Metric labels of one request.
#[derive(Debug, Clone)]
struct RequestLabels {
    method: String,
    route: String,
}

impl RequestLabels {
    fn of<B>(req: &Request<B>) -> Self {
        let route = req
            .extensions()
            .get::<MatchedPath>()
            .map(|path| path.as_str().to_string())
            .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
        Self {
            method: req.method().to_string(),
            route,
        }
    }

    fn record_body_size(&self, name: &'static str, size: Option<u64>) {
        if let Some(size) = size {
            metrics::histogram!(
                name,
                "method" => self.method.clone(),
                "path" => self.route.clone()
            )
            .record(size as f64);
        }
    }

    fn record_completion(&self, class: &'static str, seconds: f64) {
        metrics::counter!(
            "http_requests_total",
            "method" => self.method.clone(),
            "path" => self.route.clone(),
            "status" => class
        )
        .increment(1);
        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => self.method.clone(),
            "path" => self.route.clone()
        )
        .record(seconds);
    }
}

/// Tower layer installing [`Telemetry`] around the router.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelemetryLayer;

impl<S> Layer<S> for TelemetryLayer {
    type Service = Telemetry<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Telemetry { inner }
    }
}

/// Service produced by [`TelemetryLayer`].
#[derive(Debug, Clone)]
pub struct Telemetry<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for Telemetry<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ReqBody: Body,
    ResBody: Body,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = TelemetryFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let labels = RequestLabels::of(&req);
        labels.record_body_size("http_request_size_bytes", req.body().size_hint().exact());

        let request_id = RequestId::from_headers(req.headers());
        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %labels.method,
            path = %labels.route,
        );
        req.extensions_mut().insert(request_id.clone());

        let inner = span.in_scope(|| {
            tracing::debug!("request received");
            self.inner.call(req)
        });

        TelemetryFuture {
            inner,
            started: Instant::now(),
            labels,
            request_id,
            span,
        }
    }
}

pin_project! {
    /// Completes the inner response and records its outcome.
    pub struct TelemetryFuture<F> {
        #[pin]
        inner: F,
        started: Instant,
        labels: RequestLabels,
        request_id: RequestId,
        span: Span,
    }
}

impl<F, ResBody, E> Future for TelemetryFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    ResBody: Body,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _entered = this.span.enter();

        let mut result = match this.inner.poll(cx) {
            Poll::Ready(result) => result,
            Poll::Pending => return Poll::Pending,
        };

        let seconds = this.started.elapsed().as_secs_f64();
        let class = match &mut result {
            Ok(response) => {
                if let Ok(value) = HeaderValue::from_str(this.request_id.as_str()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }
                this.labels
                    .record_body_size("http_response_size_bytes", response.body().size_hint().exact());
                let status = response.status().as_u16();
                tracing::info!(status, latency_ms = seconds * 1000.0, "request completed");
                status_class(status)
            }
            Err(_) => {
                tracing::error!(latency_ms = seconds * 1000.0, "request failed");
                "5xx"
            }
        };
        this.labels.record_completion(class, seconds);

        Poll::Ready(result)
    }
}
