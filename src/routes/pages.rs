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
    db::entities::page,
    error::{AppError, codes},
    middleware::AuthRoleGuard,
    state::AppState,
};

use super::{
    DataResponse, MessageResponse,
    validation::{collect, require_non_empty, validate_slug},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    pub slug: String,
    pub title: String,
    pub body: String,
    pub meta_description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub meta_description: Option<String>,
    pub is_published: Option<bool>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(remove))
        .route("/by-slug/{slug}", get(by_slug))
        .with_state(state)
}

async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<page::Model>>>, AppError> {
    let pages = state.daos.pages.list_published().await?;
    Ok(Json(DataResponse::new(pages)))
}

async fn by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<DataResponse<page::Model>>, AppError> {
    let page = state
        .daos
        .pages
        .find_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(codes::NOT_FOUND, "Page not found"))?;
    Ok(Json(DataResponse::new(page)))
}

async fn create(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Json(body): Json<CreatePageRequest>,
) -> Result<Json<DataResponse<page::Model>>, AppError> {
    collect(vec![
        validate_slug(&body.slug),
        require_non_empty("title", &body.title),
        require_non_empty("body", &body.body),
    ])?;

    let model = page::ActiveModel {
        slug: Set(body.slug),
        title: Set(body.title),
        body: Set(body.body),
        meta_description: Set(body.meta_description),
        is_published: Set(body.is_published),
        ..Default::default()
    };
    let created = state.daos.pages.create(model).await?;
    Ok(Json(DataResponse::new(created)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePageRequest>,
) -> Result<Json<DataResponse<page::Model>>, AppError> {
    let updated = state
        .daos
        .pages
        .update(id, move |active| {
            if let Some(title) = body.title {
                active.title = Set(title);
            }
            if let Some(text) = body.body {
                active.body = Set(text);
            }
            if let Some(meta) = body.meta_description {
                active.meta_description = Set(Some(meta));
            }
            if let Some(published) = body.is_published {
                active.is_published = Set(published);
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
    state.daos.pages.delete(id).await?;
    Ok(Json(MessageResponse::ok("Page deleted")))
}
