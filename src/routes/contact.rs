use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{post, put},
};
use serde::Deserialize;
use sea_orm::Set;
use uuid::Uuid;

use crate::{
    auth::Admins,
    db::dao::{DaoBase, PaginatedResponse},
    db::entities::contact_message,
    error::AppError,
    middleware::AuthRoleGuard,
    state::AppState,
};

use super::{
    DataResponse, MessageResponse,
    validation::{collect, require_non_empty, validate_email},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMessageRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    20
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(submit).get(list))
        .route("/{id}/handled", put(mark_handled))
        .with_state(state)
}

async fn submit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubmitMessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    collect(vec![
        require_non_empty("name", &body.name),
        validate_email("email", &body.email),
        require_non_empty("message", &body.message),
    ])?;

    state
        .daos
        .contact_messages
        .create_message(&body.name, &body.email, body.phone, &body.message)
        .await?;

    Ok(Json(MessageResponse::ok("Message received")))
}

async fn list(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Admins>,
    Query(query): Query<ListQuery>,
) -> Result<Json<DataResponse<PaginatedResponse<contact_message::Model>>>, AppError> {
    let messages = state
        .daos
        .contact_messages
        .find(query.page, query.page_size, None, |query| query)
        .await?;
    Ok(Json(DataResponse::new(messages)))
}

async fn mark_handled(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Admins>,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<contact_message::Model>>, AppError> {
    let updated = state
        .daos
        .contact_messages
        .update(id, |active| {
            active.handled = Set(true);
        })
        .await?;
    Ok(Json(DataResponse::new(updated)))
}
