use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::{Condition, Expr, ExprTrait};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, Set};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::session::{self, Entity as Session};

#[derive(Clone)]
pub struct SessionDao {
    db: DatabaseConnection,
}

impl DaoBase for SessionDao {
    type Entity = Session;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl SessionDao {
    pub async fn create_session(
        &self,
        user_id: Uuid,
        refresh_token: &str,
        user_agent: Option<String>,
        ip_address: Option<String>,
        expires_at: DateTime<FixedOffset>,
    ) -> DaoResult<session::Model> {
        let now = Utc::now().fixed_offset();
        let model = session::ActiveModel {
            user_id: Set(user_id),
            refresh_token: Set(refresh_token.to_string()),
            user_agent: Set(user_agent),
            ip_address: Set(ip_address),
            last_used_at: Set(now),
            expires_at: Set(expires_at),
            is_active: Set(true),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Exact-string token match, restricted to live sessions. Expiry is
    /// checked against the database clock, not the token's own exp claim.
    pub async fn find_active_by_token(&self, refresh_token: &str) -> DaoResult<Option<session::Model>> {
        let token = refresh_token.to_string();
        self.find(1, 1, None, move |query| {
            query
                .filter(session::Column::RefreshToken.eq(token))
                .filter(session::Column::IsActive.eq(true))
                .filter(Expr::col(session::Column::ExpiresAt).gt(Expr::current_timestamp()))
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    pub async fn list_active_for_user(&self, user_id: Uuid) -> DaoResult<Vec<session::Model>> {
        self.find_all(
            Some((session::Column::LastUsedAt, Order::Desc)),
            move |query| {
                query
                    .filter(session::Column::UserId.eq(user_id))
                    .filter(session::Column::IsActive.eq(true))
                    .filter(Expr::col(session::Column::ExpiresAt).gt(Expr::current_timestamp()))
            },
        )
        .await
    }

    pub async fn touch_last_used(&self, id: Uuid) -> DaoResult<()> {
        let result = Session::update_many()
            .col_expr(session::Column::LastUsedAt, Expr::current_timestamp().into())
            .col_expr(session::Column::UpdatedAt, Expr::current_timestamp().into())
            .filter(session::Column::Id.eq(id))
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: std::any::type_name::<Session>(),
                id,
            });
        }
        Ok(())
    }

    /// Deactivates the session carrying this token. Returns how many rows
    /// changed so callers can stay idempotent about already-dead tokens.
    pub async fn revoke_by_token(&self, user_id: Uuid, refresh_token: &str) -> DaoResult<u64> {
        let result = Session::update_many()
            .col_expr(session::Column::IsActive, Expr::value(false))
            .col_expr(session::Column::UpdatedAt, Expr::current_timestamp().into())
            .filter(session::Column::UserId.eq(user_id))
            .filter(session::Column::RefreshToken.eq(refresh_token))
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(result.rows_affected)
    }

    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> DaoResult<u64> {
        let result = Session::update_many()
            .col_expr(session::Column::IsActive, Expr::value(false))
            .col_expr(session::Column::UpdatedAt, Expr::current_timestamp().into())
            .filter(session::Column::UserId.eq(user_id))
            .filter(session::Column::IsActive.eq(true))
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(result.rows_affected)
    }

    /// Revoke one session by id, scoped to its owner so a forged id cannot
    /// touch another user's sessions.
    pub async fn revoke_by_id(&self, user_id: Uuid, id: Uuid) -> DaoResult<()> {
        let result = Session::update_many()
            .col_expr(session::Column::IsActive, Expr::value(false))
            .col_expr(session::Column::UpdatedAt, Expr::current_timestamp().into())
            .filter(session::Column::Id.eq(id))
            .filter(session::Column::UserId.eq(user_id))
            .filter(session::Column::IsActive.eq(true))
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: std::any::type_name::<Session>(),
                id,
            });
        }
        Ok(())
    }

    /// Bulk cleanup of expired or revoked rows. Runs from the background
    /// reaper, never from a request handler.
    pub async fn delete_dead_sessions(&self) -> DaoResult<u64> {
        let result = Session::delete_many()
            .filter(
                Condition::any()
                    .add(Expr::col(session::Column::ExpiresAt).lt(Expr::current_timestamp()))
                    .add(session::Column::IsActive.eq(false)),
            )
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use crate::db::entities::session;

    use super::SessionDao;
    use crate::db::dao::{DaoBase, DaoLayerError};

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn session_model(user_id: Uuid, token: &str) -> session::Model {
        let now = ts();
        session::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            user_id,
            refresh_token: token.to_string(),
            user_agent: None,
            ip_address: None,
            last_used_at: now,
            expires_at: now + chrono::Duration::days(7),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn find_active_by_token_returns_match() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[session_model(user_id, "token-a")]])
            .into_connection();
        let dao = SessionDao::new(&db);

        let found = dao
            .find_active_by_token("token-a")
            .await
            .expect("query should succeed");
        assert_eq!(found.map(|s| s.user_id), Some(user_id));
    }

    #[tokio::test]
    async fn revoke_by_token_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let dao = SessionDao::new(&db);

        let revoked = dao
            .revoke_by_token(Uuid::new_v4(), "token-a")
            .await
            .expect("update should succeed");
        assert_eq!(revoked, 1);
    }

    #[tokio::test]
    async fn revoke_by_token_is_zero_for_unknown_token() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let dao = SessionDao::new(&db);

        let revoked = dao
            .revoke_by_token(Uuid::new_v4(), "gone")
            .await
            .expect("update should succeed");
        assert_eq!(revoked, 0);
    }

    #[tokio::test]
    async fn revoke_by_id_requires_a_matching_row() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let dao = SessionDao::new(&db);

        let err = dao
            .revoke_by_id(Uuid::new_v4(), id)
            .await
            .expect_err("revoke should fail");
        assert!(matches!(err, DaoLayerError::NotFound { .. }));
    }
}
