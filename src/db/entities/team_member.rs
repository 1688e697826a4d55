use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "team_members")]
pub struct Model {
    pub name: String,
    pub role_title: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub photo_url: Option<String>,
    #[sea_orm(default_value = 0)]
    pub sort_order: i32,
    #[sea_orm(default_value = true)]
    pub is_active: bool,
}

impl ActiveModelBehavior for ActiveModel {}
