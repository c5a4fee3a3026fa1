pub mod c_tool;
pub mod course;
pub mod course_setting;
pub mod extra_field;
pub mod settings_current;

pub mod prelude {
    pub use super::c_tool::{
        ActiveModel as CToolActiveModel, Column as CToolColumn, Entity as CTool,
        Model as CToolModel,
    };
    pub use super::course::{
        ActiveModel as CourseActiveModel, Column as CourseColumn, Entity as Course,
        Model as CourseModel,
    };
    pub use super::course_setting::{
        ActiveModel as CourseSettingActiveModel, Column as CourseSettingColumn,
        Entity as CourseSetting, Model as CourseSettingModel,
    };
    pub use super::extra_field::{
        ActiveModel as ExtraFieldActiveModel, Column as ExtraFieldColumn, Entity as ExtraField,
        Model as ExtraFieldModel,
    };
    pub use super::settings_current::{
        ActiveModel as SettingsCurrentActiveModel, Column as SettingsCurrentColumn,
        Entity as SettingsCurrent, Model as SettingsCurrentModel,
    };
}
