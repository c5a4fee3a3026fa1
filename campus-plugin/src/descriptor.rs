use crate::{form::SettingsField, Plugin};
use campus_error::{plugin::PluginError, CPResult};
use campus_models::constants::DEFAULT_COURSE_SETTING_TYPE;
use serde::{Deserialize, Serialize};
use std::{io::ErrorKind, path::Path};

/// File name of a plugin manifest inside its directory
pub const PLUGIN_MANIFEST: &str = "plugin.json";

const TYPE_NAME_SUFFIX: &str = "Plugin";

/// Canonical identity of a plugin.
///
/// Built from an explicit camel case name such as `BigBlueButton`; the
/// lowercase form is the storage key used for settings, tools and paths.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginIdentity {
    camel: String,
    name: String,
}

impl PluginIdentity {
    pub fn new(camel: impl Into<String>) -> Result<Self, PluginError> {
        let camel = camel.into();
        if camel.is_empty() || !camel.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PluginError::InvalidIdentity(camel));
        }
        let name = camel.to_lowercase();
        Ok(Self { camel, name })
    }

    /// Identity from a type name, dropping any module path and the
    /// `Plugin` suffix (`BigBlueButtonPlugin` -> `BigBlueButton`).
    pub fn from_type_name(type_name: &str) -> Result<Self, PluginError> {
        let short = type_name.rsplit("::").next().unwrap_or(type_name);
        Self::new(short.strip_suffix(TYPE_NAME_SUFFIX).unwrap_or(short))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn camel_case_name(&self) -> &str {
        &self.camel
    }
}

impl TryFrom<String> for PluginIdentity {
    type Error = PluginError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PluginIdentity> for String {
    fn from(value: PluginIdentity) -> Self {
        value.camel
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginFlags {
    pub is_course_plugin: bool,
    pub is_admin_plugin: bool,
    pub is_mail_plugin: bool,
    /// Add a link on the course home page when installed in a course
    pub add_course_tool: bool,
    /// Call [`Plugin::course_settings_updated`] after course settings are saved
    pub course_settings_callback: bool,
}

impl Default for PluginFlags {
    fn default() -> Self {
        PluginFlags {
            is_course_plugin: false,
            is_admin_plugin: false,
            is_mail_plugin: false,
            add_course_tool: true,
            course_settings_callback: false,
        }
    }
}

/// Setting a plugin adds to every course it is installed in.
///
/// Grouped settings are stored as `variable = group, subkey = name`,
/// ungrouped ones as `variable = name, subkey = <plugin name>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSettingSpec {
    pub name: String,
    #[serde(rename = "type", default = "CourseSettingSpec::setting_type_default")]
    pub setting_type: String,
    #[serde(default)]
    pub init_value: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

impl CourseSettingSpec {
    pub fn new(name: impl Into<String>) -> Self {
        CourseSettingSpec {
            name: name.into(),
            setting_type: Self::setting_type_default(),
            init_value: None,
            group: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_init_value(mut self, value: impl Into<String>) -> Self {
        self.init_value = Some(value.into());
        self
    }

    /// The `variable` the setting is stored under
    #[inline]
    pub fn variable(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.name)
    }

    fn setting_type_default() -> String {
        DEFAULT_COURSE_SETTING_TYPE.into()
    }
}

/// Static description of a plugin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    #[serde(rename = "name")]
    pub identity: PluginIdentity,
    pub version: String,
    pub author: String,
    /// Global settings, in form order
    #[serde(default)]
    pub fields: Vec<SettingsField>,
    #[serde(default)]
    pub course_settings: Vec<CourseSettingSpec>,
    #[serde(default)]
    pub flags: PluginFlags,
}

impl PluginDescriptor {
    pub fn new(identity: PluginIdentity, version: impl Into<String>, author: impl Into<String>) -> Self {
        PluginDescriptor {
            identity,
            version: version.into(),
            author: author.into(),
            fields: Vec::new(),
            course_settings: Vec::new(),
            flags: PluginFlags::default(),
        }
    }
}

/// Plugin declared entirely by its `plugin.json` manifest, with every hook
/// left at its default.
#[derive(Clone, Debug)]
pub struct ManifestPlugin {
    descriptor: PluginDescriptor,
}

impl ManifestPlugin {
    /// Read `<root>/<name>/plugin.json`
    pub async fn load(root: &Path, name: &str) -> CPResult<Self> {
        let path = root.join(name).join(PLUGIN_MANIFEST);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PluginError::Manifest(format!("{} not found", path.display())).into())
            }
            Err(e) => return Err(e.into()),
        };

        let descriptor: PluginDescriptor = serde_json::from_str(&raw)
            .map_err(|e| PluginError::Manifest(format!("{}: {e}", path.display())))?;
        if descriptor.identity.name() != name.to_lowercase() {
            return Err(PluginError::Manifest(format!(
                "{} declares plugin {}",
                path.display(),
                descriptor.identity.camel_case_name()
            ))
            .into());
        }
        Ok(Self { descriptor })
    }
}

impl From<PluginDescriptor> for ManifestPlugin {
    fn from(descriptor: PluginDescriptor) -> Self {
        Self { descriptor }
    }
}

impl Plugin for ManifestPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldKind;

    #[test]
    fn name_is_lowercase_camel_name() {
        let identity = PluginIdentity::new("BigBlueButton").unwrap();
        assert_eq!(identity.name(), "bigbluebutton");
        assert_eq!(identity.camel_case_name(), "BigBlueButton");
    }

    #[test]
    fn type_name_suffix_and_path_are_stripped() {
        let identity = PluginIdentity::from_type_name("plugins::zoom::ZoomPlugin").unwrap();
        assert_eq!(identity.camel_case_name(), "Zoom");
        assert_eq!(identity.name(), "zoom");

        let identity = PluginIdentity::from_type_name("Buycourses").unwrap();
        assert_eq!(identity.name(), "buycourses");
    }

    #[test]
    fn rejects_unusable_identities() {
        assert!(PluginIdentity::new("").is_err());
        assert!(PluginIdentity::new("../etc").is_err());
        assert!(PluginIdentity::from_type_name("Plugin").is_err());
    }

    #[test]
    fn manifest_defaults() {
        let descriptor: PluginDescriptor = serde_json::from_str(
            r#"{
                "name": "Bbb",
                "version": "2.8",
                "author": "Platform team",
                "fields": [
                    {"name": "tool_enable", "type": "boolean"},
                    {"name": "host", "type": "text"}
                ],
                "course_settings": [{"name": "bbb_record", "group": "bbb"}]
            }"#,
        )
        .unwrap();

        assert_eq!(descriptor.identity.name(), "bbb");
        assert_eq!(descriptor.fields[0].kind, FieldKind::Boolean);
        assert_eq!(descriptor.course_settings[0].setting_type, "textfield");
        assert_eq!(descriptor.course_settings[0].variable(), "bbb");
        assert!(descriptor.flags.add_course_tool);
        assert!(!descriptor.flags.is_course_plugin);
    }
}
