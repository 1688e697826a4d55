pub mod auth;
pub mod certifications;
pub mod contact;
pub mod health;
pub mod jobs;
pub mod news;
pub mod pages;
pub mod projects;
pub mod reviews;
pub mod settings;
pub mod team;
pub mod validation;

use std::sync::Arc;

use axum::Router;
use serde::Serialize;

use crate::state::AppState;

pub const API_PREFIX: &str = "/api";

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .nest("/health", health::router(Arc::clone(&state)))
        .nest("/auth", auth::router(Arc::clone(&state)))
        .nest("/pages", pages::router(Arc::clone(&state)))
        .nest("/news", news::router(Arc::clone(&state)))
        .nest("/projects", projects::router(Arc::clone(&state)))
        .nest("/team", team::router(Arc::clone(&state)))
        .nest("/reviews", reviews::router(Arc::clone(&state)))
        .nest("/certifications", certifications::router(Arc::clone(&state)))
        .nest("/jobs", jobs::router(Arc::clone(&state)))
        .nest("/settings", settings::router(Arc::clone(&state)))
        .nest("/contact", contact::router(state));

    Router::new().nest(API_PREFIX, api)
}
