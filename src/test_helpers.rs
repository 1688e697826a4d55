//! Helpers for exercising the router against a mocked database.

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::{config::AuthConfig, state::AppState};

pub const TEST_ACCESS_SECRET: &str = "test-access-secret";
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret";

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_ACCESS_SECRET.to_string(),
        jwt_refresh_secret: TEST_REFRESH_SECRET.to_string(),
        access_ttl_secs: 3600,
        refresh_ttl_days: 7,
        remember_me_ttl_days: 30,
        max_login_attempts: 5,
        lockout_minutes: 30,
        login_rate_limit_max: 5,
        login_rate_limit_window_secs: 900,
        admin_username: "admin".to_string(),
        admin_email: "admin@korsvagen.example".to_string(),
        admin_password: "adminpassword".to_string(),
    }
}

pub fn test_state(db: DatabaseConnection) -> Arc<AppState> {
    AppState::new(test_auth_config(), db)
}

pub fn test_app(db: DatabaseConnection) -> Router {
    crate::app(test_state(db))
}
