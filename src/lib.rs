pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

pub mod test_helpers;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{catch_panic_layer, json_error_middleware},
    state::AppState,
};

/// Builds the full application router with its middleware stack.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::router(state))
        .layer(axum::middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
}
