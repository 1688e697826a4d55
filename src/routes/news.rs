use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use chrono::Utc;
use serde::Deserialize;
use sea_orm::Set;
use uuid::Uuid;

use crate::{
    auth::{Admins, Editors},
    db::dao::DaoBase,
    db::entities::news_article,
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
pub struct CreateArticleRequest {
    pub slug: String,
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub cover_image_url: Option<String>,
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
) -> Result<Json<DataResponse<Vec<news_article::Model>>>, AppError> {
    let articles = state.daos.news.list_published().await?;
    Ok(Json(DataResponse::new(articles)))
}

async fn by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<DataResponse<news_article::Model>>, AppError> {
    let article = state
        .daos
        .news
        .find_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(codes::NOT_FOUND, "Article not found"))?;
    Ok(Json(DataResponse::new(article)))
}

async fn create(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Json(body): Json<CreateArticleRequest>,
) -> Result<Json<DataResponse<news_article::Model>>, AppError> {
    collect(vec![
        validate_slug(&body.slug),
        require_non_empty("title", &body.title),
        require_non_empty("body", &body.body),
    ])?;

    let published_at = body.is_published.then(|| Utc::now().fixed_offset());
    let model = news_article::ActiveModel {
        slug: Set(body.slug),
        title: Set(body.title),
        summary: Set(body.summary),
        body: Set(body.body),
        cover_image_url: Set(body.cover_image_url),
        published_at: Set(published_at),
        is_published: Set(body.is_published),
        ..Default::default()
    };
    let created = state.daos.news.create(model).await?;
    Ok(Json(DataResponse::new(created)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateArticleRequest>,
) -> Result<Json<DataResponse<news_article::Model>>, AppError> {
    let updated = state
        .daos
        .news
        .update(id, move |active| {
            if let Some(title) = body.title {
                active.title = Set(title);
            }
            if let Some(summary) = body.summary {
                active.summary = Set(Some(summary));
            }
            if let Some(text) = body.body {
                active.body = Set(text);
            }
            if let Some(url) = body.cover_image_url {
                active.cover_image_url = Set(Some(url));
            }
            if let Some(published) = body.is_published {
                active.is_published = Set(published);
                if published {
                    active.published_at = Set(Some(Utc::now().fixed_offset()));
                }
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
    state.daos.news.delete(id).await?;
    Ok(Json(MessageResponse::ok("Article deleted")))
}
