use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The profile lives in exactly one row under this key.
pub const PROFILE_ID: i32 = 1;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "about")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    pub full_name: String,
    pub logo_url: Option<String>,
    pub profile_img: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio_content: Option<String>,
    pub stack_list: Option<String>, // comma separated
    pub completed: i32,
    pub progress: i32,
    pub hosted: i32,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
