use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

/// Append-only audit trail for auth-flow outcomes. `user_id` is null for
/// failures against unknown usernames.
#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    #[sea_orm(indexed)]
    pub user_id: Option<Uuid>,
    pub action: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub success: bool,
    pub details: Option<Json>,
}

impl ActiveModelBehavior for ActiveModel {}
