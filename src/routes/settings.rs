use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    auth::Admins,
    db::entities::site_setting,
    error::{AppError, codes},
    middleware::AuthRoleGuard,
    state::AppState,
};

use super::DataResponse;

#[derive(Debug, Deserialize)]
pub struct PutSettingRequest {
    pub value: serde_json::Value,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list))
        .route("/{key}", get(get_setting).put(put_setting))
        .with_state(state)
}

async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<site_setting::Model>>>, AppError> {
    let settings = state.daos.site_settings.list_all().await?;
    Ok(Json(DataResponse::new(settings)))
}

async fn get_setting(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<DataResponse<site_setting::Model>>, AppError> {
    let setting = state
        .daos
        .site_settings
        .find_by_key(&key)
        .await?
        .ok_or_else(|| AppError::not_found(codes::NOT_FOUND, "Setting not found"))?;
    Ok(Json(DataResponse::new(setting)))
}

async fn put_setting(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Admins>,
    Path(key): Path<String>,
    Json(body): Json<PutSettingRequest>,
) -> Result<Json<DataResponse<site_setting::Model>>, AppError> {
    let setting = state.daos.site_settings.upsert(&key, body.value).await?;
    Ok(Json(DataResponse::new(setting)))
}
