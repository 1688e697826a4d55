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
    db::entities::job_posting,
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
pub struct CreateJobRequest {
    pub slug: String,
    pub title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub description: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub is_open: Option<bool>,
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
) -> Result<Json<DataResponse<Vec<job_posting::Model>>>, AppError> {
    let jobs = state.daos.job_postings.list_open().await?;
    Ok(Json(DataResponse::new(jobs)))
}

async fn by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<DataResponse<job_posting::Model>>, AppError> {
    let job = state
        .daos
        .job_postings
        .find_open_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(codes::NOT_FOUND, "Job posting not found"))?;
    Ok(Json(DataResponse::new(job)))
}

async fn create(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Json(body): Json<CreateJobRequest>,
) -> Result<Json<DataResponse<job_posting::Model>>, AppError> {
    collect(vec![
        validate_slug(&body.slug),
        require_non_empty("title", &body.title),
        require_non_empty("description", &body.description),
    ])?;

    let model = job_posting::ActiveModel {
        slug: Set(body.slug),
        title: Set(body.title),
        department: Set(body.department),
        location: Set(body.location),
        description: Set(body.description),
        is_open: Set(true),
        ..Default::default()
    };
    let created = state.daos.job_postings.create(model).await?;
    Ok(Json(DataResponse::new(created)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateJobRequest>,
) -> Result<Json<DataResponse<job_posting::Model>>, AppError> {
    let updated = state
        .daos
        .job_postings
        .update(id, move |active| {
            if let Some(title) = body.title {
                active.title = Set(title);
            }
            if let Some(department) = body.department {
                active.department = Set(Some(department));
            }
            if let Some(location) = body.location {
                active.location = Set(Some(location));
            }
            if let Some(description) = body.description {
                active.description = Set(description);
            }
            if let Some(is_open) = body.is_open {
                active.is_open = Set(is_open);
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
    state.daos.job_postings.delete(id).await?;
    Ok(Json(MessageResponse::ok("Job posting deleted")))
}
