pub mod error;
pub mod handlers;
pub mod rate_limit;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

use axum::Router;

use crate::rate_limit::RateLimitState;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState, limiter: RateLimitState) -> Router {
    Router::new()
        .merge(routes::contact_routes(limiter))
        .merge(routes::health_routes())
        .fallback(handlers::route_not_found)
        .with_state(state)
}
