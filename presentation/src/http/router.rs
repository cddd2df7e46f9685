//! Router creation and configuration

use super::handlers::{generate_dua, health};
use super::{AppState, RateLimit, ServerError};
use axum::{
    Router,
    http::{HeaderValue, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Create the API router
///
/// Rate limiting covers every route and keys on the peer address, so the
/// router must be served with connect info (see [`serve`](super::serve)).
/// Pass `None` to disable it. Every response carries `nosniff` and
/// frame-denial headers.
pub fn create_router(state: AppState, rate_limit: Option<RateLimit>) -> Result<Router, ServerError> {
    let mut router = Router::new()
        .route("/api/gemini/dua", post(generate_dua))
        .route("/health", get(health))
        .with_state(state);

    if let Some(limit) = rate_limit {
        let config = GovernorConfigBuilder::default()
            .per_second(limit.per_seconds)
            .burst_size(limit.burst)
            .finish()
            .ok_or(ServerError::InvalidRateLimit(limit))?;
        router = router.layer(GovernorLayer {
            config: Arc::new(config),
        });
    }

    Ok(router
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()))
}
