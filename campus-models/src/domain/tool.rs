use crate::{
    constants::{TOOL_ADDRESS, TOOL_CATEGORY, TOOL_TARGET},
    entities::c_tool,
};
use sea_orm::{IntoActiveModel, Set};

/// Tool-bar link for a plugin on a course home page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCourseTool {
    /// Sequence local to the course
    pub id: i32,
    pub c_id: i32,
    pub name: String,
    pub link: String,
    pub image: String,
}

impl IntoActiveModel<c_tool::ActiveModel> for NewCourseTool {
    fn into_active_model(self) -> c_tool::ActiveModel {
        c_tool::ActiveModel {
            id: Set(self.id),
            c_id: Set(self.c_id),
            name: Set(self.name),
            link: Set(self.link),
            image: Set(Some(self.image)),
            visibility: Set(true),
            admin: Set(Some("0".into())),
            address: Set(Some(TOOL_ADDRESS.into())),
            added_tool: Set(false),
            target: Set(TOOL_TARGET.into()),
            category: Set(TOOL_CATEGORY.into()),
            session_id: Set(0),
            ..Default::default()
        }
    }
}
