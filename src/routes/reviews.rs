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
    db::entities::review,
    error::{AppError, FieldError},
    middleware::AuthRoleGuard,
    state::AppState,
};

use super::{
    DataResponse, MessageResponse,
    validation::{collect, require_non_empty},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub author: String,
    pub company: Option<String>,
    pub quote: String,
    pub rating: i32,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    pub author: Option<String>,
    pub company: Option<String>,
    pub quote: Option<String>,
    pub rating: Option<i32>,
    pub is_published: Option<bool>,
}

fn validate_rating(rating: i32) -> Result<(), FieldError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(FieldError::new("rating", "must be between 1 and 5"))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(remove))
        .with_state(state)
}

async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<review::Model>>>, AppError> {
    let reviews = state.daos.reviews.list_published().await?;
    Ok(Json(DataResponse::new(reviews)))
}

async fn create(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<Json<DataResponse<review::Model>>, AppError> {
    collect(vec![
        require_non_empty("author", &body.author),
        require_non_empty("quote", &body.quote),
        validate_rating(body.rating),
    ])?;

    let model = review::ActiveModel {
        author: Set(body.author),
        company: Set(body.company),
        quote: Set(body.quote),
        rating: Set(body.rating),
        is_published: Set(body.is_published),
        ..Default::default()
    };
    let created = state.daos.reviews.create(model).await?;
    Ok(Json(DataResponse::new(created)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    _guard: AuthRoleGuard<Editors>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateReviewRequest>,
) -> Result<Json<DataResponse<review::Model>>, AppError> {
    if let Some(rating) = body.rating {
        collect(vec![validate_rating(rating)])?;
    }

    let updated = state
        .daos
        .reviews
        .update(id, move |active| {
            if let Some(author) = body.author {
                active.author = Set(author);
            }
            if let Some(company) = body.company {
                active.company = Set(Some(company));
            }
            if let Some(quote) = body.quote {
                active.quote = Set(quote);
            }
            if let Some(rating) = body.rating {
                active.rating = Set(rating);
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
    state.daos.reviews.delete(id).await?;
    Ok(Json(MessageResponse::ok("Review deleted")))
}
