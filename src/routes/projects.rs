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
    db::entities::project,
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
pub struct CreateProjectRequest {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub year: Option<i32>,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub year: Option<i32>,
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
) -> Result<Json<DataResponse<Vec<project::Model>>>, AppError> {
    let projects = state.daos.projects.list_published().await?;
    Ok(Json(DataResponse::new(projects)))
}

async fn by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<DataResponse<project::Model>>, AppError> {
    let project = state
        .daos
        .projects
        .find_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(codes::NOT_FOUND, "Project not found"))?;
    Ok(Json(DataResponse::new(project)))
}

async fn create(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Json(body): Json<CreateProjectRequest>,
) -> Result<Json<DataResponse<project::Model>>, AppError> {
    collect(vec![
        validate_slug(&body.slug),
        require_non_empty("title", &body.title),
        require_non_empty("description", &body.description),
    ])?;

    let model = project::ActiveModel {
        slug: Set(body.slug),
        title: Set(body.title),
        description: Set(body.description),
        location: Set(body.location),
        year: Set(body.year),
        cover_image_url: Set(body.cover_image_url),
        is_published: Set(body.is_published),
        ..Default::default()
    };
    let created = state.daos.projects.create(model).await?;
    Ok(Json(DataResponse::new(created)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProjectRequest>,
) -> Result<Json<DataResponse<project::Model>>, AppError> {
    let updated = state
        .daos
        .projects
        .update(id, move |active| {
            if let Some(title) = body.title {
                active.title = Set(title);
            }
            if let Some(description) = body.description {
                active.description = Set(description);
            }
            if let Some(location) = body.location {
                active.location = Set(Some(location));
            }
            if let Some(year) = body.year {
                active.year = Set(Some(year));
            }
            if let Some(url) = body.cover_image_url {
                active.cover_image_url = Set(Some(url));
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
    state.daos.projects.delete(id).await?;
    Ok(Json(MessageResponse::ok("Project deleted")))
}
