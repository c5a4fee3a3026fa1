//! `SeaORM` Entity for custom field definitions.
//!
//! This is the shared shape of every per-owner field table (course, user,
//! session ...). The owner relation lives on those tables, not here.

use crate::enums::extra_field::ExtraFieldType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "extra_field")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub field_type: ExtraFieldType,
    pub field_variable: String,
    pub field_display_text: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub field_default_value: Option<String>,
    /// Sort key; rows without one sort last.
    pub field_order: Option<i32>,
    pub field_visible: bool,
    pub field_changeable: bool,
    pub field_filter: bool,
    /// Last modification time.
    pub tms: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
