use std::{marker::PhantomData, sync::Arc};

use axum::{extract::FromRequestParts, http::header};

use crate::{
    auth::{AccessClaims, RoleSet},
    auth::jwt::{TokenError, verify_access_token},
    error::{AppError, codes},
    state::AppState,
};

/// Pulls the bearer token for protected routes. Falls back to an
/// `accessToken` cookie so browser clients that keep tokens in cookies work
/// without extra plumbing.
fn extract_access_token(parts: &axum::http::request::Parts) -> Option<String> {
    let auth = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if let Some(token) = auth.strip_prefix("Bearer ") {
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    let cookies = parts
        .headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        if name.trim() == "accessToken" && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

// Auth guard: validate the access JWT and expose its claims.
impl FromRequestParts<Arc<AppState>> for AccessClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<AccessClaims>().cloned() {
            return Ok(claims);
        }

        let token = extract_access_token(parts).ok_or_else(|| {
            AppError::unauthorized(codes::AUTH_TOKEN_REQUIRED, "Access token required")
        })?;

        let claims = verify_access_token(&state.keys, &token).map_err(|err| match err {
            TokenError::Expired => {
                AppError::unauthorized(codes::AUTH_TOKEN_INVALID, "Access token expired")
            }
            _ => AppError::unauthorized(codes::AUTH_TOKEN_INVALID, "Invalid access token"),
        })?;

        parts.extensions.insert(claims.clone());
        Ok(claims)
    }
}

pub type AuthGuard = AccessClaims;

pub struct AuthRoleGuard<R: RoleSet> {
    pub claims: AccessClaims,
    _marker: PhantomData<R>,
}

impl<R> FromRequestParts<Arc<AppState>> for AuthRoleGuard<R>
where
    R: RoleSet,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let claims = AccessClaims::from_request_parts(parts, state).await?;

        if !R::allows(claims.role) {
            return Err(AppError::forbidden(format!(
                "Insufficient privileges: requires {} access",
                R::describe()
            )));
        }

        Ok(Self {
            claims,
            _marker: PhantomData,
        })
    }
}
