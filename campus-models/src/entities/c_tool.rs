use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Course home tool-bar link.
///
/// `iid` is the global key; `id` is a sequence local to the course.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "c_tool")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub iid: i32,
    pub id: i32,
    pub c_id: i32,
    pub name: String,
    pub link: String,
    pub image: Option<String>,
    pub visibility: bool,
    pub admin: Option<String>,
    pub address: Option<String>,
    pub added_tool: bool,
    pub target: String,
    pub category: String,
    pub session_id: i32,
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
