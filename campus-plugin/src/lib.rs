//! Base layer shared by every installable plugin.
//!
//! A plugin describes itself with a [`PluginDescriptor`] and may override the
//! hooks of [`Plugin`]. Everything stateful (settings cache, string table,
//! environment) lives in a [`PluginContext`] owned by the caller.

mod context;
mod course;
pub mod descriptor;
pub mod env;
pub mod form;
mod lang;
mod tabs;
pub mod value;

pub use campus_models::enums::setting::TabUserFilter;
pub use context::{InfoValue, PluginContext, PluginInfo};
pub use course::{CourseInstall, CourseUninstall};
pub use descriptor::{
    CourseSettingSpec, ManifestPlugin, PluginDescriptor, PluginFlags, PluginIdentity,
};
pub use env::{KeyTranslator, PluginEnv, Translator};
pub use form::{FieldKind, FormElement, SelectOption, SettingsField, SettingsForm};
pub use tabs::ManageTabOutcome;
pub use value::SettingValue;

use async_trait::async_trait;
use campus_error::CPResult;
use std::collections::BTreeMap;

/// Behaviour of a concrete plugin. Only [`Plugin::descriptor`] is required.
#[async_trait]
pub trait Plugin: Send + Sync {
    fn descriptor(&self) -> &PluginDescriptor;

    /// Runs after a course's plugin settings were saved, when
    /// [`PluginFlags::course_settings_callback`] is set.
    async fn course_settings_updated(
        &self,
        _course_id: i32,
        _values: &BTreeMap<String, String>,
    ) -> CPResult<()> {
        Ok(())
    }

    /// Whether a submitted course setting may be stored
    fn validate_course_setting(&self, _variable: &str) -> bool {
        true
    }

    /// Markup for a page region, if the plugin renders into it
    fn render_region(&self, _region: &str) -> Option<String> {
        None
    }

    /// Runs after the administrator saved the plugin settings
    async fn after_configure(&self) -> CPResult<()> {
        Ok(())
    }
}
