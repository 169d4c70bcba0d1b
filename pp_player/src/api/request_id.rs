//! Request ID middleware for log correlation.
//!
//! The tournament host fires one request per decision; tagging each with an
//! id makes a single hand traceable through the engine's logs.

use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderMap, HeaderValue, StatusCode, request::Parts},
    middleware::Next,
    response::Response,
};
use std::{fmt, time::Instant};
use uuid::Uuid;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Answers slower than this are logged as warnings; the host times bots out.
pub const SLOW_ANSWER_MS: u128 = 500;

/// Correlation id of one host request, available to handlers as an extractor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestId(String);

impl RequestId {
    /// Reuse the host's id when it sent a non-empty one, else mint a uuid.
    fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map_or_else(|| Uuid::new_v4().to_string(), str::to_string);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<RequestId>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Request ID middleware is not installed",
        ))
    }
}

/// Tag the request with its id, echo the id back, and time the answer.
///
/// # Example
///
/// ```no_run
/// use axum::{Router, routing::post, middleware};
/// use pp_player::api::request_id::tag_request;
///
/// # async fn example() {
/// let app: Router = Router::new()
///     .route("/", post(|| async { "0" }))
///     .layer(middleware::from_fn(tag_request));
/// # }
/// ```
pub async fn tag_request(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers());
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(request_id.clone());

    let started = Instant::now();
    let mut response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis();

    if let Ok(header_value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    if elapsed_ms > SLOW_ANSWER_MS {
        tracing::warn!(%request_id, %path, elapsed_ms, "Slow answer to host");
    } else {
        tracing::debug!(
            %request_id,
            %path,
            status = %response.status(),
            elapsed_ms,
            "Answered host"
        );
    }

    response
}
