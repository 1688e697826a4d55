use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;

use crate::{
    auth::jwt::TokenKeys,
    auth::rate_limit::FixedWindowLimiter,
    config::AuthConfig,
    db::dao::DaoContext,
};

pub struct AppState {
    pub daos: DaoContext,
    pub keys: TokenKeys,
    pub auth: AuthConfig,
    pub login_limiter: FixedWindowLimiter,
}

impl AppState {
    pub fn new(auth: AuthConfig, db: DatabaseConnection) -> Arc<Self> {
        let keys = TokenKeys::from_secrets(
            auth.jwt_secret.as_bytes(),
            auth.jwt_refresh_secret.as_bytes(),
        );
        let login_limiter = FixedWindowLimiter::new(
            auth.login_rate_limit_max,
            Duration::from_secs(auth.login_rate_limit_window_secs),
        );
        Arc::new(Self {
            daos: DaoContext::new(&db),
            keys,
            auth,
            login_limiter,
        })
    }
}
