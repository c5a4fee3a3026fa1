//! Stateless table access.
//!
//! Every function takes the connection to run on, so a caller can pass a
//! pooled connection or an open transaction.

pub mod course;
pub mod course_setting;
pub mod extra_field;
pub mod settings;
pub mod tool;

pub use course::CourseRepository;
pub use course_setting::CourseSettingRepository;
pub use extra_field::ExtraFieldRepository;
pub use settings::SettingsRepository;
pub use tool::ToolRepository;
