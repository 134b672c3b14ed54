//! Request tracking for every service router.
//!
//! Each request carries a correlation id: the one the caller sent in
//! `X-Correlation-ID` when it parses as a UUID, a fresh v4 otherwise. The id is
//! stored in the request extensions, recorded on an `http_request` span that
//! wraps the handler, and echoed back on the response.
//!
//! ```ignore
//! use reservations_web::middleware::instrument;
//!
//! let app = instrument(Router::new().route("/:id", get(get_booking)));
//! ```

use axum::{
    Router,
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::{self, Next},
    response::Response,
};
use tower_http::trace::TraceLayer;
use tracing::{Instrument, Span};
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Wrap a router with request tracing and correlation id tracking.
///
/// Correlation tracking is the outer layer, so `TraceLayer` spans nest inside
/// the `http_request` span.
pub fn instrument<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(track_correlation_id))
}

/// Middleware function behind [`instrument`].
pub async fn track_correlation_id(mut req: Request, next: Next) -> Response {
    let id = header_correlation_id(req.headers()).unwrap_or_else(Uuid::new_v4);
    req.extensions_mut().insert(id);

    let span = request_span(&req, id);
    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::try_from(id.hyphenated().to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}

/// Parse the caller-supplied correlation id, if any.
pub(crate) fn header_correlation_id(headers: &HeaderMap) -> Option<Uuid> {
    let raw = headers.get(CORRELATION_ID_HEADER)?.to_str().ok()?;
    Uuid::parse_str(raw.trim()).ok()
}

fn request_span(req: &Request, id: Uuid) -> Span {
    tracing::info_span!(
        "http_request",
        correlation_id = %id,
        method = %req.method(),
        path = req.uri().path(),
    )
}

/// Read the correlation id stored by [`track_correlation_id`].
pub trait CorrelationIdExt {
    /// `None` when the request did not pass through [`instrument`].
    fn try_correlation_id(&self) -> Option<Uuid>;
}

impl CorrelationIdExt for Request {
    fn try_correlation_id(&self) -> Option<Uuid> {
        self.extensions().get::<Uuid>().copied()
    }
}
