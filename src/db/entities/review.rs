use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    pub author: String,
    pub company: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub quote: String,
    pub rating: i32,
    #[sea_orm(default_value = false)]
    pub is_published: bool,
}

impl ActiveModelBehavior for ActiveModel {}
