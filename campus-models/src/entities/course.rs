use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub title: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_setting::Entity")]
    CourseSetting,
    #[sea_orm(has_many = "super::c_tool::Entity")]
    CTool,
}

impl Related<super::course_setting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseSetting.def()
    }
}

impl Related<super::c_tool::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CTool.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
