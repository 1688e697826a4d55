use std::{sync::Arc, time::Duration};

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{db::dao::DaoBase, state::AppState};

const DB_PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: &'static str,
    pub database: bool,
    pub version: &'static str,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/", get(health)).with_state(state)
}

/// Liveness plus a bounded database ping. Always 200: a dead pool is
/// reported in the body, not as an HTTP failure.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = matches!(
        tokio::time::timeout(DB_PING_TIMEOUT, state.daos.admin_users.db().ping()).await,
        Ok(Ok(()))
    );

    Json(HealthResponse {
        success: true,
        status: if database { "ok" } else { "degraded" },
        database,
        version: env!("CARGO_PKG_VERSION"),
    })
}
