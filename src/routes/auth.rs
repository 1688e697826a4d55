use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, header},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::entities::{admin_user, session},
    error::{AppError, codes},
    middleware::AuthGuard,
    services::auth_service::{self, RequestMeta},
    state::AppState,
};

use super::{MessageResponse, validation::validate_login};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub last_login_at: Option<String>,
}

impl From<admin_user::Model> for UserResponse {
    fn from(user: admin_user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            last_login_at: user.last_login_at.map(|at| at.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensResponse {
    pub access: String,
    pub refresh: String,
    pub expires_in: usize,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
    pub tokens: TokensResponse,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub user: UserResponse,
    pub tokens: TokensResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub last_used_at: String,
    pub expires_at: String,
    pub created_at: String,
}

impl From<session::Model> for SessionResponse {
    fn from(session: session::Model) -> Self {
        Self {
            id: session.id,
            user_agent: session.user_agent,
            ip_address: session.ip_address,
            last_used_at: session.last_used_at.to_rfc3339(),
            expires_at: session.expires_at.to_rfc3339(),
            created_at: session.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub success: bool,
    pub sessions: Vec<SessionResponse>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/sessions", get(sessions))
        .route("/sessions/{id}", delete(revoke_session))
        .with_state(state)
}

/// Pulls client ip/user-agent out of the request headers. The service does
/// not trust these for authorization, only for auditing and rate limiting.
fn request_meta(headers: &HeaderMap) -> RequestMeta {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());
    RequestMeta {
        ip_address,
        user_agent,
    }
}

async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login(&body.username, &body.password)?;
    let meta = request_meta(&headers);

    let outcome =
        auth_service::login(&state, &body.username, &body.password, body.remember_me, &meta)
            .await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user: outcome.user.into(),
        tokens: TokensResponse {
            access: outcome.tokens.access,
            refresh: outcome.tokens.refresh,
            expires_in: outcome.expires_in,
        },
    }))
}

async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    let token = body.refresh_token.as_deref().filter(|t| !t.is_empty()).ok_or_else(|| {
        AppError::bad_request(codes::REFRESH_TOKEN_REQUIRED, "Refresh token required")
    })?;
    let meta = request_meta(&headers);

    let outcome = auth_service::refresh(&state, token, &meta).await?;

    // The refresh token is not rotated: the response echoes the one presented.
    Ok(Json(RefreshResponse {
        success: true,
        user: outcome.user.into(),
        tokens: TokensResponse {
            access: outcome.access_token,
            refresh: token.to_string(),
            expires_in: outcome.expires_in,
        },
    }))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
    headers: HeaderMap,
    body: Option<Json<LogoutRequest>>,
) -> Result<Json<MessageResponse>, AppError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let meta = request_meta(&headers);

    auth_service::logout(&state, &claims, body.refresh_token.as_deref(), &meta).await?;

    Ok(Json(MessageResponse::ok("Logged out")))
}

async fn me(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
) -> Result<Json<MeResponse>, AppError> {
    let user = auth_service::current_user(&state, &claims).await?;
    Ok(Json(MeResponse {
        success: true,
        user: user.into(),
    }))
}

async fn sessions(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
) -> Result<Json<SessionsResponse>, AppError> {
    let sessions = auth_service::list_sessions(&state, &claims).await?;
    Ok(Json(SessionsResponse {
        success: true,
        sessions: sessions.into_iter().map(Into::into).collect(),
    }))
}

async fn revoke_session(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let meta = request_meta(&headers);
    auth_service::revoke_session(&state, &claims, id, &meta).await?;
    Ok(Json(MessageResponse::ok("Session revoked")))
}
