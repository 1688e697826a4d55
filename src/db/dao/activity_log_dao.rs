use sea_orm::{DatabaseConnection, Set};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::activity_log::{self, Entity as ActivityLog};

/// Audit trail vocabulary. Stored as uppercase strings so log rows read the
/// same in SQL as in application logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthAction {
    LoginSuccess,
    LoginFailed,
    LoginBlocked,
    Logout,
    TokenRefresh,
    SessionRevoked,
}

impl AuthAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoginSuccess => "LOGIN_SUCCESS",
            Self::LoginFailed => "LOGIN_FAILED",
            Self::LoginBlocked => "LOGIN_BLOCKED",
            Self::Logout => "LOGOUT",
            Self::TokenRefresh => "TOKEN_REFRESH",
            Self::SessionRevoked => "SESSION_REVOKED",
        }
    }
}

#[derive(Clone)]
pub struct ActivityLogDao {
    db: DatabaseConnection,
}

impl DaoBase for ActivityLogDao {
    type Entity = ActivityLog;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ActivityLogDao {
    /// Append-only insert. Callers treat failures as non-fatal; the auth flow
    /// must not break because the audit table is unavailable.
    pub async fn record(
        &self,
        user_id: Option<Uuid>,
        action: AuthAction,
        ip_address: Option<String>,
        user_agent: Option<String>,
        success: bool,
        details: Option<serde_json::Value>,
    ) -> DaoResult<activity_log::Model> {
        let model = activity_log::ActiveModel {
            user_id: Set(user_id),
            action: Set(action.as_str().to_string()),
            ip_address: Set(ip_address),
            user_agent: Set(user_agent),
            success: Set(success),
            details: Set(details),
            ..Default::default()
        };
        self.create(model).await
    }
}

#[cfg(test)]
mod tests {
    use super::AuthAction;

    #[test]
    fn actions_serialize_to_uppercase_names() {
        assert_eq!(AuthAction::LoginSuccess.as_str(), "LOGIN_SUCCESS");
        assert_eq!(AuthAction::LoginFailed.as_str(), "LOGIN_FAILED");
        assert_eq!(AuthAction::LoginBlocked.as_str(), "LOGIN_BLOCKED");
        assert_eq!(AuthAction::Logout.as_str(), "LOGOUT");
        assert_eq!(AuthAction::TokenRefresh.as_str(), "TOKEN_REFRESH");
        assert_eq!(AuthAction::SessionRevoked.as_str(), "SESSION_REVOKED");
    }
}
