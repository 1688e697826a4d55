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
    db::entities::team_member,
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
pub struct CreateMemberRequest {
    pub name: String,
    pub role_title: String,
    pub bio: String,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub role_title: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(remove))
        .with_state(state)
}

async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<team_member::Model>>>, AppError> {
    let members = state.daos.team_members.list_active().await?;
    Ok(Json(DataResponse::new(members)))
}

async fn create(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Json(body): Json<CreateMemberRequest>,
) -> Result<Json<DataResponse<team_member::Model>>, AppError> {
    collect(vec![
        require_non_empty("name", &body.name),
        require_non_empty("roleTitle", &body.role_title),
    ])?;

    let model = team_member::ActiveModel {
        name: Set(body.name),
        role_title: Set(body.role_title),
        bio: Set(body.bio),
        photo_url: Set(body.photo_url),
        sort_order: Set(body.sort_order),
        is_active: Set(true),
        ..Default::default()
    };
    let created = state.daos.team_members.create(model).await?;
    Ok(Json(DataResponse::new(created)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMemberRequest>,
) -> Result<Json<DataResponse<team_member::Model>>, AppError> {
    let updated = state
        .daos
        .team_members
        .update(id, move |active| {
            if let Some(name) = body.name {
                active.name = Set(name);
            }
            if let Some(role_title) = body.role_title {
                active.role_title = Set(role_title);
            }
            if let Some(bio) = body.bio {
                active.bio = Set(bio);
            }
            if let Some(url) = body.photo_url {
                active.photo_url = Set(Some(url));
            }
            if let Some(order) = body.sort_order {
                active.sort_order = Set(order);
            }
            if let Some(is_active) = body.is_active {
                active.is_active = Set(is_active);
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
    state.daos.team_members.delete(id).await?;
    Ok(Json(MessageResponse::ok("Team member deleted")))
}
