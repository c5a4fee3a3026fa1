use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-course configuration row.
///
/// Grouped settings use `variable = <group>, subkey = <field>`,
/// ungrouped ones `variable = <field>, subkey = <plugin>`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "c_course_setting")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub c_id: i32,
    pub variable: String,
    pub subkey: Option<String>,
    pub setting_type: String,
    pub category: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub value: Option<String>,
    pub title: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
