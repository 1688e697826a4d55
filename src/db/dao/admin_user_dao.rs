use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, QueryFilter, Set, Statement,
};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::admin_user::{self, Entity as AdminUser};

#[derive(Clone)]
pub struct AdminUserDao {
    db: DatabaseConnection,
}

impl DaoBase for AdminUserDao {
    type Entity = AdminUser;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl AdminUserDao {
    pub async fn find_by_username(&self, username: &str) -> DaoResult<Option<admin_user::Model>> {
        let username = username.to_string();
        self.find(1, 1, None, move |query| {
            query.filter(admin_user::Column::Username.eq(username))
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    pub async fn find_active_by_username(
        &self,
        username: &str,
    ) -> DaoResult<Option<admin_user::Model>> {
        let username = username.to_string();
        self.find(1, 1, None, move |query| {
            query
                .filter(admin_user::Column::Username.eq(username))
                .filter(admin_user::Column::IsActive.eq(true))
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> DaoResult<admin_user::Model> {
        let model = admin_user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.to_string()),
            is_active: Set(true),
            login_attempts: Set(0),
            locked_until: Set(None),
            last_login_at: Set(None),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Counts a failed login attempt in a single statement so that two
    /// concurrent failures against the same account cannot both observe the
    /// same pre-increment value. Returns the post-increment count.
    pub async fn increment_login_attempts(&self, id: &Uuid) -> DaoResult<i32> {
        let statement = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "UPDATE admin_users SET login_attempts = login_attempts + 1, updated_at = NOW() \
             WHERE id = $1 RETURNING login_attempts",
            [(*id).into()],
        );

        let row = self
            .db
            .query_one_raw(statement)
            .await
            .map_err(DaoLayerError::Db)?
            .ok_or(DaoLayerError::NotFound {
                entity: std::any::type_name::<AdminUser>(),
                id: *id,
            })?;

        row.try_get::<i32>("", "login_attempts")
            .map_err(DaoLayerError::Db)
    }

    pub async fn lock_account(
        &self,
        id: &Uuid,
        until: DateTime<FixedOffset>,
    ) -> DaoResult<()> {
        self.update(*id, move |active| {
            active.locked_until = Set(Some(until));
        })
        .await
        .map(|_| ())
    }

    /// Successful login: reset the failure counter, clear any stale lock and
    /// stamp last_login_at.
    pub async fn reset_after_login(
        &self,
        id: &Uuid,
        at: DateTime<FixedOffset>,
    ) -> DaoResult<()> {
        self.update(*id, move |active| {
            active.login_attempts = Set(0);
            active.locked_until = Set(None);
            active.last_login_at = Set(Some(at));
        })
        .await
        .map(|_| ())
    }
}
