// Constants shared by the plugin subsystem

/// The default configuration file name for the application.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "campus.toml";

/// Category of every plugin owned row in `settings_current`.
pub const PLUGINS_CATEGORY: &str = "Plugins";
/// Type of plugin option rows in `settings_current`.
pub const SETTING_TYPE: &str = "setting";
/// Variable of the plugin status row.
pub const STATUS_VARIABLE: &str = "status";
/// Status value of an installed plugin.
pub const STATUS_INSTALLED: &str = "installed";

/// Category of course setting rows written by plugins.
pub const COURSE_PLUGINS_CATEGORY: &str = "plugins";
/// Default course setting type when a declaration omits it.
pub const DEFAULT_COURSE_SETTING_TYPE: &str = "textfield";

pub const TABS_VARIABLE: &str = "show_tabs";
pub const CUSTOM_TAB_PREFIX: &str = "custom_tab_";
pub const TAB_SUBKEYTEXT_PREFIX: &str = "Tabs";
pub const TAB_CATEGORY: &str = "Platform";
pub const TAB_SETTING_TYPE: &str = "checkbox";
pub const TAB_FILTER_NO_STUDENT: &str = "::no-student";
pub const TAB_FILTER_ONLY_STUDENT: &str = "::only-student";

pub const TOOL_CATEGORY: &str = "plugin";
pub const TOOL_ADDRESS: &str = "squaregrey.gif";
pub const TOOL_TARGET: &str = "_self";

pub const DATA_DIR: &str = "./data";
pub const PLUGIN_DIR: &str = "./plugin";
