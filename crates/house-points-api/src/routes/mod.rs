//! HTTP routes.

pub mod health;
pub mod standings;
pub mod webhook;

use axum::Router;
use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::Request;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(webhook::router())
        .nest(
            "/api/v1/standings",
            standings::router().layer(CorsLayer::permissive()),
        )
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// Request span keyed by the route template. The raw URI is never recorded
/// because the webhook path carries a credential.
fn request_span(request: &Request<Body>) -> Span {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or("<unmatched>", MatchedPath::as_str);
    tracing::debug_span!("request", method = %request.method(), route)
}
