use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{
    handlers,
    rate_limit::{self, RateLimitState},
    state::AppState,
};

/// Intake route. The rate limiter is scoped here so health checks never
/// consume form quota.
pub fn contact_routes(limiter: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(handlers::submit_contact))
        .route_layer(middleware::from_fn_with_state(
            limiter,
            rate_limit::rate_limit_middleware,
        ))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}
