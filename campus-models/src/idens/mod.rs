pub mod c_tool;
pub mod course;
pub mod course_setting;
pub mod extra_field;
pub mod settings_current;

const INIT_SYSTEM_ORDER: i32 = 0;
const INIT_SETTINGS_ORDER: i32 = INIT_SYSTEM_ORDER + 1;

const INIT_COURSE_ORDER: i32 = 100;
const INIT_COURSE_SETTING_ORDER: i32 = INIT_COURSE_ORDER + 1;
const INIT_TOOL_ORDER: i32 = INIT_COURSE_SETTING_ORDER + 1;

const INIT_EXTRA_FIELD_ORDER: i32 = 200;
