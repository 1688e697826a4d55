use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "certifications")]
pub struct Model {
    pub name: String,
    pub issuer: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[sea_orm(default_value = 0)]
    pub sort_order: i32,
}

impl ActiveModelBehavior for ActiveModel {}
