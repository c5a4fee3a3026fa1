use crate::entities::{course, course_setting};
use sea_orm::{IntoActiveModel, Set};
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewCourse {
    pub code: String,
    pub title: String,
}

impl IntoActiveModel<course::ActiveModel> for NewCourse {
    fn into_active_model(self) -> course::ActiveModel {
        course::ActiveModel {
            code: Set(self.code),
            title: Set(self.title),
            ..Default::default()
        }
    }
}

/// Course setting row written on plugin course install.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCourseSetting {
    pub c_id: i32,
    pub variable: String,
    pub subkey: Option<String>,
    pub setting_type: String,
    pub category: String,
    pub value: Option<String>,
}

impl IntoActiveModel<course_setting::ActiveModel> for NewCourseSetting {
    fn into_active_model(self) -> course_setting::ActiveModel {
        course_setting::ActiveModel {
            c_id: Set(self.c_id),
            variable: Set(self.variable),
            subkey: Set(self.subkey),
            setting_type: Set(self.setting_type),
            category: Set(self.category),
            value: Set(self.value),
            title: Set(String::new()),
            ..Default::default()
        }
    }
}
