use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Grid span used when the admin form leaves it blank.
pub const DEFAULT_SPAN: &str = "col-span-1";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub tag: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub span: String, // layout class, e.g. "col-span-2"
    pub live_link: Option<String>,
    pub repo_link: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
