use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "job_postings")]
pub struct Model {
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(default_value = true)]
    pub is_open: bool,
}

impl ActiveModelBehavior for ActiveModel {}
