pub use crate::domain::{
    course::{NewCourse, NewCourseSetting},
    extra_field::{NewExtraField, UpdateExtraField},
    setting::{NewTab, TabUpdate},
    tool::NewCourseTool,
};
