use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::Deserialize;
use sea_orm::Set;
use uuid::Uuid;

use crate::{
    auth::{Admins, Editors},
    db::dao::DaoBase,
    db::entities::certification,
    error::AppError,
    middleware::AuthRoleGuard,
    state::AppState,
};

use super::{
    DataResponse, MessageResponse,
    validation::{collect, require_non_empty},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCertificationRequest {
    pub name: String,
    pub issuer: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCertificationRequest {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(remove))
        .with_state(state)
}

async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<certification::Model>>>, AppError> {
    let certifications = state.daos.certifications.list_all().await?;
    Ok(Json(DataResponse::new(certifications)))
}

async fn create(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Json(body): Json<CreateCertificationRequest>,
) -> Result<Json<DataResponse<certification::Model>>, AppError> {
    collect(vec![
        require_non_empty("name", &body.name),
        require_non_empty("issuer", &body.issuer),
    ])?;

    let model = certification::ActiveModel {
        name: Set(body.name),
        issuer: Set(body.issuer),
        description: Set(body.description),
        image_url: Set(body.image_url),
        sort_order: Set(body.sort_order),
        ..Default::default()
    };
    let created = state.daos.certifications.create(model).await?;
    Ok(Json(DataResponse::new(created)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCertificationRequest>,
) -> Result<Json<DataResponse<certification::Model>>, AppError> {
    let updated = state
        .daos
        .certifications
        .update(id, move |active| {
            if let Some(name) = body.name {
                active.name = Set(name);
            }
            if let Some(issuer) = body.issuer {
                active.issuer = Set(issuer);
            }
            if let Some(description) = body.description {
                active.description = Set(Some(description));
            }
            if let Some(url) = body.image_url {
                active.image_url = Set(Some(url));
            }
            if let Some(order) = body.sort_order {
                active.sort_order = Set(order);
            }
        })
        .await?;
    Ok(Json(DataResponse::new(updated)))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Admins>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.daos.certifications.delete(id).await?;
    Ok(Json(MessageResponse::ok("Certification deleted")))
}
