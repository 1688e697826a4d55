//! Login, token refresh, logout and session management for the admin panel.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    auth::{AccessClaims, Role, TokenPair, password},
    auth::jwt::{
        TokenError, issue_access_token, issue_refresh_token, make_access_claims,
        make_refresh_claims, verify_refresh_token,
    },
    auth::rate_limit::RateLimitDecision,
    db::dao::{AuthAction, DaoBase, DaoContext},
    db::entities::{admin_user, session},
    error::{AppError, codes},
    state::AppState,
};

/// Client metadata captured for sessions and the audit trail.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

pub struct LoginSuccess {
    pub user: admin_user::Model,
    pub tokens: TokenPair,
    pub expires_in: usize,
}

pub struct RefreshSuccess {
    pub user: admin_user::Model,
    pub access_token: String,
    pub expires_in: usize,
}

/// Single entry point for failed logins: bump the counter atomically, set
/// the lock once the limit is reached, and tell the caller how many attempts
/// remain. The attempt that arms the lock still answers 401; the 423 is only
/// served to attempts made while `locked_until` lies in the future.
async fn register_failed_attempt(
    state: &AppState,
    user: &admin_user::Model,
    meta: &RequestMeta,
) -> AppError {
    let attempts = match state.daos.admin_users.increment_login_attempts(&user.id).await {
        Ok(attempts) => attempts,
        Err(err) => return AppError::from(err),
    };

    if attempts >= state.auth.max_login_attempts {
        let until = Utc::now().fixed_offset() + Duration::minutes(state.auth.lockout_minutes);
        if let Err(err) = state.daos.admin_users.lock_account(&user.id, until).await {
            return AppError::from(err);
        }
    }

    record_activity(
        &state.daos,
        Some(user.id),
        AuthAction::LoginFailed,
        meta,
        false,
        Some(serde_json::json!({ "attempts": attempts })),
    )
    .await;

    let remaining = (state.auth.max_login_attempts - attempts).max(0);
    AppError::unauthorized_with(
        codes::INVALID_CREDENTIALS,
        "Invalid credentials",
        serde_json::json!({ "attemptsRemaining": remaining }),
    )
}

pub async fn login(
    state: &AppState,
    username: &str,
    plaintext: &str,
    remember_me: bool,
    meta: &RequestMeta,
) -> Result<LoginSuccess, AppError> {
    let limiter_key = meta.ip_address.as_deref().unwrap_or("unknown");
    if state.login_limiter.check(limiter_key) == RateLimitDecision::Limited {
        return Err(AppError::too_many_requests(
            "Too many login attempts, try again later",
        ));
    }

    let user = state
        .daos
        .admin_users
        .find_active_by_username(username)
        .await?;

    let Some(user) = user else {
        // Burn comparable work for unknown usernames so response timing does
        // not reveal which accounts exist.
        let _ = password::hash_password(plaintext);
        record_activity(
            &state.daos,
            None,
            AuthAction::LoginFailed,
            meta,
            false,
            Some(serde_json::json!({ "username": username })),
        )
        .await;
        return Err(AppError::unauthorized(
            codes::INVALID_CREDENTIALS,
            "Invalid credentials",
        ));
    };

    let now = Utc::now().fixed_offset();
    if let Some(locked_until) = user.locked_until {
        if locked_until > now {
            record_activity(
                &state.daos,
                Some(user.id),
                AuthAction::LoginBlocked,
                meta,
                false,
                None,
            )
            .await;
            return Err(AppError::locked(locked_until));
        }
    }

    if !password::verify_password(plaintext, &user.password_hash) {
        return Err(register_failed_attempt(state, &user, meta).await);
    }

    let role = Role::try_from(user.role.as_str()).map_err(|_| {
        AppError::internal(format!("Account has an unrecognized role: {}", user.role))
    })?;

    state.daos.admin_users.reset_after_login(&user.id, now).await?;

    let refresh_ttl_days = if remember_me {
        state.auth.remember_me_ttl_days
    } else {
        state.auth.refresh_ttl_days
    };
    let refresh_ttl_secs = (refresh_ttl_days as usize).saturating_mul(24 * 60 * 60);

    let access_claims = make_access_claims(&user.id, &user.email, role, state.auth.access_ttl_secs);
    let refresh_claims = make_refresh_claims(&user.id, refresh_ttl_secs);
    let tokens = TokenPair {
        access: issue_access_token(&state.keys, &access_claims)?,
        refresh: issue_refresh_token(&state.keys, &refresh_claims)?,
    };

    state
        .daos
        .sessions
        .create_session(
            user.id,
            &tokens.refresh,
            meta.user_agent.clone(),
            meta.ip_address.clone(),
            now + Duration::days(refresh_ttl_days),
        )
        .await?;

    record_activity(
        &state.daos,
        Some(user.id),
        AuthAction::LoginSuccess,
        meta,
        true,
        Some(serde_json::json!({ "rememberMe": remember_me })),
    )
    .await;

    Ok(LoginSuccess {
        user,
        tokens,
        expires_in: state.auth.access_ttl_secs,
    })
}

/// Exchanges a live refresh token for a new access token. The refresh token
/// itself is not rotated; the session row keeps its original expiry.
pub async fn refresh(
    state: &AppState,
    refresh_token: &str,
    meta: &RequestMeta,
) -> Result<RefreshSuccess, AppError> {
    let claims = verify_refresh_token(&state.keys, refresh_token).map_err(|err| match err {
        TokenError::Expired => {
            AppError::unauthorized(codes::INVALID_REFRESH_TOKEN, "Refresh token expired")
        }
        TokenError::WrongType => {
            AppError::unauthorized(codes::INVALID_TOKEN_TYPE, "Not a refresh token")
        }
        TokenError::Malformed(_) => {
            AppError::unauthorized(codes::INVALID_REFRESH_TOKEN, "Invalid refresh token")
        }
    })?;

    let user_id: Uuid = claims.sub.parse().map_err(|_| {
        AppError::unauthorized(codes::INVALID_REFRESH_TOKEN, "Invalid refresh token")
    })?;

    let session = state
        .daos
        .sessions
        .find_active_by_token(refresh_token)
        .await?
        .filter(|session| session.user_id == user_id)
        .ok_or_else(|| {
            AppError::unauthorized(codes::INVALID_SESSION, "Session is no longer active")
        })?;

    // The token's role claim may be stale; re-read the account so a disabled
    // user cannot keep minting access tokens.
    let user = load_active_user(state, user_id).await?.ok_or_else(|| {
        AppError::unauthorized(codes::USER_NOT_FOUND, "Account not found")
    })?;

    let role = Role::try_from(user.role.as_str()).map_err(|_| {
        AppError::internal(format!("Account has an unrecognized role: {}", user.role))
    })?;

    state.daos.sessions.touch_last_used(session.id).await?;

    let access_claims = make_access_claims(&user.id, &user.email, role, state.auth.access_ttl_secs);
    let access_token = issue_access_token(&state.keys, &access_claims)?;

    record_activity(
        &state.daos,
        Some(user.id),
        AuthAction::TokenRefresh,
        meta,
        true,
        None,
    )
    .await;

    Ok(RefreshSuccess {
        user,
        access_token,
        expires_in: state.auth.access_ttl_secs,
    })
}

/// Revokes the presented session, or every session for the caller when no
/// refresh token accompanies the request. Idempotent: logging out an
/// already-dead token still succeeds.
pub async fn logout(
    state: &AppState,
    claims: &AccessClaims,
    refresh_token: Option<&str>,
    meta: &RequestMeta,
) -> Result<(), AppError> {
    let user_id = parse_subject(claims)?;

    let all_devices = refresh_token.is_none();
    let revoked = match refresh_token {
        Some(token) => state.daos.sessions.revoke_by_token(user_id, token).await?,
        None => state.daos.sessions.revoke_all_for_user(user_id).await?,
    };
    tracing::debug!(%user_id, revoked, all_devices, "logout");

    record_activity(
        &state.daos,
        Some(user_id),
        AuthAction::Logout,
        meta,
        true,
        Some(serde_json::json!({ "allDevices": all_devices })),
    )
    .await;

    Ok(())
}

pub async fn current_user(
    state: &AppState,
    claims: &AccessClaims,
) -> Result<admin_user::Model, AppError> {
    let user_id = parse_subject(claims)?;
    load_active_user(state, user_id)
        .await?
        .ok_or_else(|| AppError::not_found(codes::USER_NOT_FOUND, "Account not found"))
}

/// `None` for missing or deactivated accounts; real database failures stay
/// 500. Callers pick the status: 404 on `/me`, 401 on the refresh path.
async fn load_active_user(
    state: &AppState,
    user_id: Uuid,
) -> Result<Option<admin_user::Model>, AppError> {
    match state.daos.admin_users.find_by_id(user_id).await {
        Ok(user) if user.is_active => Ok(Some(user)),
        Ok(_) => Ok(None),
        Err(crate::db::dao::DaoLayerError::NotFound { .. }) => Ok(None),
        Err(other) => Err(AppError::from(other)),
    }
}

pub async fn list_sessions(
    state: &AppState,
    claims: &AccessClaims,
) -> Result<Vec<session::Model>, AppError> {
    let user_id = parse_subject(claims)?;
    Ok(state.daos.sessions.list_active_for_user(user_id).await?)
}

pub async fn revoke_session(
    state: &AppState,
    claims: &AccessClaims,
    session_id: Uuid,
    meta: &RequestMeta,
) -> Result<(), AppError> {
    let user_id = parse_subject(claims)?;
    state
        .daos
        .sessions
        .revoke_by_id(user_id, session_id)
        .await
        .map_err(|err| match err {
            crate::db::dao::DaoLayerError::NotFound { .. } => {
                AppError::not_found(codes::NOT_FOUND, "Session not found")
            }
            other => AppError::from(other),
        })?;

    record_activity(
        &state.daos,
        Some(user_id),
        AuthAction::SessionRevoked,
        meta,
        true,
        Some(serde_json::json!({ "sessionId": session_id })),
    )
    .await;

    Ok(())
}

/// Ensures the bootstrap admin account exists. Runs once at startup.
pub async fn seed_admin(state: &AppState) -> anyhow::Result<()> {
    if let Some(existing) = state
        .daos
        .admin_users
        .find_by_username(&state.auth.admin_username)
        .await?
    {
        tracing::info!("admin user already present: {}", existing.username);
        return Ok(());
    }

    let hash = password::hash_password(&state.auth.admin_password)
        .map_err(|err| anyhow::anyhow!("admin seed hash error: {err}"))?;
    let user = state
        .daos
        .admin_users
        .create_user(
            &state.auth.admin_username,
            &state.auth.admin_email,
            &hash,
            Role::SuperAdmin.as_str(),
        )
        .await?;
    tracing::info!("seeded admin user {}", user.username);
    Ok(())
}

fn parse_subject(claims: &AccessClaims) -> Result<Uuid, AppError> {
    claims
        .sub
        .parse()
        .map_err(|_| AppError::unauthorized(codes::AUTH_TOKEN_INVALID, "Invalid access token"))
}

/// Best-effort audit write. A failing log insert is reported but never turns
/// into a request failure.
async fn record_activity(
    daos: &DaoContext,
    user_id: Option<Uuid>,
    action: AuthAction,
    meta: &RequestMeta,
    success: bool,
    details: Option<serde_json::Value>,
) {
    if let Err(err) = daos
        .activity_logs
        .record(
            user_id,
            action,
            meta.ip_address.clone(),
            meta.user_agent.clone(),
            success,
            details,
        )
        .await
    {
        tracing::warn!(action = action.as_str(), "activity log write failed: {err}");
    }
}
