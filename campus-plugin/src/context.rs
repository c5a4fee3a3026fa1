use crate::{
    env::PluginEnv,
    form::{
        Checkbox, Choice, FieldKind, FormElement, SelectOption, SettingsForm, SubmitButton,
        CHECKBOX_GROUP_LABEL, SHOW_MAIN_MENU_TAB, SUBMIT_BUTTON,
    },
    lang::{self, Strings},
    value::SettingValue,
    Plugin, PluginFlags,
};
use campus_error::CPResult;
use campus_models::{
    constants::{PLUGINS_CATEGORY, STATUS_INSTALLED},
    entities::prelude::SettingsCurrentModel,
};
use campus_repository::SettingsRepository;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use std::{
    collections::{BTreeMap, HashMap},
    io::ErrorKind,
    path::PathBuf,
};
use tracing::{debug, info, instrument};

/// A plugin bound to its environment, with the settings and string caches.
///
/// Caches are filled lazily. The settings cache is refreshed only by
/// [`PluginContext::get_settings`] with `force_reload`, or while it is empty;
/// the string table is loaded once.
pub struct PluginContext<P: Plugin> {
    plugin: P,
    env: PluginEnv,
    settings: Vec<SettingsCurrentModel>,
    strings: Option<Strings>,
}

/// Summary of a plugin for listings and the admin page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub title: String,
    pub comment: String,
    pub version: String,
    pub author: String,
    pub plugin_class: String,
    #[serde(flatten)]
    pub flags: PluginFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_form: Option<SettingsForm>,
    /// Current value of every declared field, or the choices of select fields
    pub values: BTreeMap<String, InfoValue>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InfoValue {
    Current(Option<SettingValue>),
    Options(Vec<SelectOption>),
}

impl<P: Plugin> PluginContext<P> {
    pub fn new(plugin: P, env: PluginEnv) -> Self {
        PluginContext {
            plugin,
            env,
            settings: Vec::new(),
            strings: None,
        }
    }

    #[inline]
    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    #[inline]
    pub fn env(&self) -> &PluginEnv {
        &self.env
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.plugin.descriptor().identity.name()
    }

    #[inline]
    pub fn camel_case_name(&self) -> &str {
        self.plugin.descriptor().identity.camel_case_name()
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.plugin.descriptor().version
    }

    #[inline]
    pub fn author(&self) -> &str {
        &self.plugin.descriptor().author
    }

    pub async fn title(&mut self) -> CPResult<String> {
        self.get_lang("plugin_title").await
    }

    pub async fn comment(&mut self) -> CPResult<String> {
        self.get_lang("plugin_comment").await
    }

    pub fn render_region(&self, region: &str) -> Option<String> {
        self.plugin.render_region(region)
    }

    pub(crate) fn plugin_dir(&self) -> PathBuf {
        self.env.plugin_root.join(self.name())
    }

    /// Setting rows of this plugin in the current access url.
    pub async fn get_settings<C>(
        &mut self,
        db: &C,
        force_reload: bool,
    ) -> CPResult<&[SettingsCurrentModel]>
    where
        C: ConnectionTrait,
    {
        if self.settings.is_empty() || force_reload {
            let name = self.plugin.descriptor().identity.name();
            self.settings =
                SettingsRepository::find_plugin_settings(name, self.env.access_url, db).await?;
            debug!(plugin = name, rows = self.settings.len(), "Loaded plugin settings");
        }
        Ok(&self.settings)
    }

    /// Value of `<name>_<option>`, `None` when the option was never saved.
    pub async fn get<C>(&mut self, db: &C, option: &str) -> CPResult<Option<SettingValue>>
    where
        C: ConnectionTrait,
    {
        let variable = format!("{}_{option}", self.name());
        let settings = self.get_settings(db, false).await?;
        Ok(settings
            .iter()
            .find(|setting| setting.variable == variable)
            .map(|setting| match setting.selected_value.as_deref() {
                Some(raw) => SettingValue::decode(raw),
                None => SettingValue::Text(String::new()),
            }))
    }

    /// Store submitted values of declared fields and run the configure hook.
    ///
    /// Undeclared names are ignored. The settings cache is left as is.
    #[instrument(name = "plugin-save-settings", skip_all)]
    pub async fn save_settings<C>(
        &self,
        db: &C,
        values: &BTreeMap<String, SettingValue>,
    ) -> CPResult<usize>
    where
        C: ConnectionTrait,
    {
        let name = self.name();
        let mut saved = 0;
        for field in &self.plugin.descriptor().fields {
            let Some(value) = values.get(&field.name) else {
                continue;
            };
            let encoded = value.encode();
            SettingsRepository::upsert_plugin_setting(
                &format!("{name}_{}", field.name),
                name,
                &field.name,
                Some(&encoded),
                self.env.access_url,
                db,
            )
            .await?;
            saved += 1;
        }

        for ignored in values
            .keys()
            .filter(|key| !self.plugin.descriptor().fields.iter().any(|f| &f.name == *key))
        {
            debug!(plugin = name, option = %ignored, "Ignoring undeclared setting");
        }

        self.plugin.after_configure().await?;
        info!(plugin = name, saved, "Plugin settings saved");
        Ok(saved)
    }

    /// Whether the platform marked the plugin as installed
    pub async fn is_enabled<C>(&self, db: &C) -> CPResult<bool>
    where
        C: ConnectionTrait,
    {
        let status = SettingsRepository::find_plugin_status(self.name(), db).await?;
        Ok(status.and_then(|row| row.selected_value).as_deref() == Some(STATUS_INSTALLED))
    }

    pub async fn get_info<C>(&mut self, db: &C) -> CPResult<PluginInfo>
    where
        C: ConnectionTrait,
    {
        let descriptor = self.plugin.descriptor().clone();
        let mut info = PluginInfo {
            name: descriptor.identity.name().to_string(),
            title: self.title().await?,
            comment: self.comment().await?,
            version: descriptor.version.clone(),
            author: descriptor.author.clone(),
            plugin_class: descriptor.identity.camel_case_name().to_string(),
            flags: descriptor.flags.clone(),
            settings_form: None,
            values: BTreeMap::new(),
        };

        if !descriptor.fields.is_empty() {
            info.settings_form = Some(self.get_settings_form(db).await?);
            for field in &descriptor.fields {
                let value = match &field.kind {
                    FieldKind::Select { options, .. } => InfoValue::Options(options.clone()),
                    _ => InfoValue::Current(self.get(db, &field.name).await?),
                };
                info.values.insert(field.name.clone(), value);
            }
        }
        Ok(info)
    }

    /// Contents of `resources/<name>.css`, if the plugin ships one
    pub async fn get_css(&self) -> CPResult<Option<String>> {
        let name = self.name();
        let path = self.plugin_dir().join("resources").join(format!("{name}.css"));
        match tokio::fs::read_to_string(&path).await {
            Ok(css) => Ok(Some(css)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn strings(&mut self) -> CPResult<&Strings> {
        if self.strings.is_none() {
            let strings = lang::load(
                &self.plugin_dir().join("lang"),
                &self.env.language,
                self.env.parent_language.as_deref(),
            )
            .await?;
            self.strings = Some(strings);
        }
        Ok(&*self.strings.get_or_insert_with(Strings::new))
    }

    /// Plugin translation of `key`, falling back to the platform translator.
    pub async fn get_lang(&mut self, key: &str) -> CPResult<String> {
        if let Some(text) = self.strings().await?.get(key) {
            return Ok(text.clone());
        }
        Ok(self.env.translator.translate(key))
    }

    /// Whether the plugin itself translates `key`
    pub async fn has_lang(&mut self, key: &str) -> CPResult<bool> {
        Ok(self.strings().await?.contains_key(key))
    }

    async fn help(&mut self, field: &str) -> CPResult<Option<String>> {
        let key = format!("{field}_help");
        if !self.has_lang(&key).await? {
            return Ok(None);
        }

        let mut help = self.get_lang(&key).await?;
        if field == SHOW_MAIN_MENU_TAB {
            let url = format!("{}plugin/{}/index.php", self.env.web_path, self.name());
            help = help.replacen("%s", &format!("<a href={url}>{url}</a>"), 1);
        }
        Ok(Some(help))
    }

    /// Build the settings form from the declared fields.
    ///
    /// Checkbox fields are gathered into one group; their checked state is
    /// read from the `Plugins` settings of the whole access url by title.
    pub async fn get_settings_form<C>(&mut self, db: &C) -> CPResult<SettingsForm>
    where
        C: ConnectionTrait,
    {
        let fields = self.plugin.descriptor().fields.clone();

        let mut checked: HashMap<String, bool> = HashMap::new();
        if fields.iter().any(|f| f.kind == FieldKind::Checkbox) {
            let rows =
                SettingsRepository::find_by_category(PLUGINS_CATEGORY, self.env.access_url, db)
                    .await?;
            for row in rows {
                if fields
                    .iter()
                    .any(|f| f.kind == FieldKind::Checkbox && f.name == row.title)
                {
                    checked.insert(row.title, row.selected_value.as_deref() == Some("true"));
                }
            }
        }

        let mut elements = Vec::with_capacity(fields.len());
        let mut checkboxes = Vec::new();
        let mut defaults = BTreeMap::new();

        for field in fields {
            let name = field.name;
            defaults.insert(name.clone(), self.get(db, &name).await?);
            let help = self.help(&name).await?;
            let label = self.get_lang(&name).await?;

            match field.kind {
                FieldKind::Html => elements.push(FormElement::Html { content: label }),
                FieldKind::Wysiwyg => elements.push(FormElement::HtmlEditor { name, label }),
                FieldKind::Text => elements.push(FormElement::Text { name, label, help }),
                FieldKind::Boolean => {
                    let choices = vec![
                        Choice {
                            label: self.env.translator.translate("Yes"),
                            value: "true".into(),
                        },
                        Choice {
                            label: self.env.translator.translate("No"),
                            value: "false".into(),
                        },
                    ];
                    elements.push(FormElement::RadioGroup {
                        name,
                        label,
                        help,
                        choices,
                    });
                }
                FieldKind::Checkbox => checkboxes.push(Checkbox {
                    checked: checked.get(&name).copied().unwrap_or(false),
                    name,
                    label,
                    value: "true".into(),
                }),
                FieldKind::Select {
                    options,
                    attributes,
                } => elements.push(FormElement::Select {
                    name,
                    label,
                    help,
                    options,
                    attributes,
                }),
            }
        }

        if !checkboxes.is_empty() {
            // group help is read from `sms_types_help`
            elements.push(FormElement::CheckboxGroup {
                label: self.get_lang(CHECKBOX_GROUP_LABEL).await?,
                help: self.help(CHECKBOX_GROUP_LABEL).await?,
                checkboxes,
            });
        }

        Ok(SettingsForm {
            name: self.name().to_string(),
            elements,
            defaults,
            submit: SubmitButton {
                name: SUBMIT_BUTTON.into(),
                label: self.get_lang("Save").await?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        descriptor::{PluginDescriptor, PluginIdentity},
        form::SettingsField,
        ManifestPlugin,
    };
    use campus_storage::init_memory_db;
    use std::path::Path;

    fn context(root: &Path, fields: Vec<SettingsField>) -> PluginContext<ManifestPlugin> {
        let mut descriptor =
            PluginDescriptor::new(PluginIdentity::new("Notify").unwrap(), "1.0", "Team");
        descriptor.fields = fields;
        let env = PluginEnv {
            access_url: 1,
            plugin_root: root.to_path_buf(),
            web_path: "https://campus.test/".into(),
            language: "en".into(),
            parent_language: None,
            translator: std::sync::Arc::new(crate::KeyTranslator),
        };
        PluginContext::new(descriptor.into(), env)
    }

    fn write_lang(root: &Path, body: &str) {
        let dir = root.join("notify").join("lang");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("en.json"), body).unwrap();
    }

    #[tokio::test]
    async fn form_follows_field_declarations() {
        let root = tempfile::tempdir().unwrap();
        write_lang(
            root.path(),
            r#"{"show_main_menu_tab": "Show tab", "show_main_menu_tab_help": "Opens %s",
                "sms": "SMS", "sms_types": "Channels", "Save": "Store"}"#,
        );
        let db = init_memory_db().await.unwrap();
        SettingsRepository::upsert_plugin_setting("notify_sms", "notify", "sms", Some("true"), 1, &db)
            .await
            .unwrap();

        let mut ctx = context(
            root.path(),
            vec![
                SettingsField::new("show_main_menu_tab", FieldKind::Boolean),
                SettingsField::new("sms", FieldKind::Checkbox),
                SettingsField::new("mail", FieldKind::Checkbox),
                SettingsField::new("intro", FieldKind::Html),
            ],
        );
        let form = ctx.get_settings_form(&db).await.unwrap();

        assert_eq!(form.name, "notify");
        match form.element("show_main_menu_tab").unwrap() {
            FormElement::RadioGroup { label, help, choices, .. } => {
                assert_eq!(label, "Show tab");
                assert_eq!(
                    help.as_deref(),
                    Some(
                        "Opens <a href=https://campus.test/plugin/notify/index.php>\
                         https://campus.test/plugin/notify/index.php</a>"
                    )
                );
                let values: Vec<&str> = choices.iter().map(|c| c.value.as_str()).collect();
                assert_eq!(values, vec!["true", "false"]);
            }
            other => panic!("unexpected element {other:?}"),
        }

        let checkboxes = form.checkbox_group().unwrap();
        assert_eq!(checkboxes.len(), 2);
        assert!(checkboxes[0].checked);
        assert!(!checkboxes[1].checked);
        assert!(matches!(form.elements.last(), Some(FormElement::CheckboxGroup { label, .. }) if label == "Channels"));

        assert_eq!(form.defaults["sms"], Some(SettingValue::Text("true".into())));
        assert_eq!(form.defaults["mail"], None);
        assert_eq!(form.submit.name, SUBMIT_BUTTON);
        assert_eq!(form.submit.label, "Store");
    }

    #[tokio::test]
    async fn form_renders_text_editor_and_select_fields() {
        let root = tempfile::tempdir().unwrap();
        write_lang(
            root.path(),
            r#"{"host": "Host", "host_help": "Server address", "body": "Body",
                "level": "Level", "level_help": "Pick one or more"}"#,
        );
        let db = init_memory_db().await.unwrap();
        let options = vec![SelectOption::new("a", "Alpha"), SelectOption::new("b", "Beta")];
        let attributes = BTreeMap::from([("multiple".to_string(), "multiple".to_string())]);

        let mut ctx = context(
            root.path(),
            vec![
                SettingsField::new("host", FieldKind::Text),
                SettingsField::new("body", FieldKind::Wysiwyg),
                SettingsField::new(
                    "level",
                    FieldKind::Select {
                        options: options.clone(),
                        attributes: attributes.clone(),
                    },
                ),
            ],
        );
        let form = ctx.get_settings_form(&db).await.unwrap();

        assert_eq!(
            form.element("host"),
            Some(&FormElement::Text {
                name: "host".into(),
                label: "Host".into(),
                help: Some("Server address".into()),
            })
        );
        assert_eq!(
            form.element("body"),
            Some(&FormElement::HtmlEditor {
                name: "body".into(),
                label: "Body".into(),
            })
        );
        assert_eq!(
            form.element("level"),
            Some(&FormElement::Select {
                name: "level".into(),
                label: "Level".into(),
                help: Some("Pick one or more".into()),
                options,
                attributes,
            })
        );
        assert_eq!(form.checkbox_group(), None);
        assert_eq!(form.elements.len(), 3);
    }

    #[tokio::test]
    async fn checkbox_state_follows_same_title_in_other_plugins() {
        let root = tempfile::tempdir().unwrap();
        write_lang(root.path(), r#"{"mail": "Mail", "sms_types": "Channels", "sms_types_help": "Sent on save"}"#);
        let db = init_memory_db().await.unwrap();
        SettingsRepository::upsert_plugin_setting("other_mail", "other", "mail", Some("true"), 1, &db)
            .await
            .unwrap();

        let mut ctx = context(
            root.path(),
            vec![SettingsField::new("mail", FieldKind::Checkbox)],
        );
        let form = ctx.get_settings_form(&db).await.unwrap();

        assert_eq!(
            form.checkbox_group().unwrap(),
            &[Checkbox {
                name: "mail".into(),
                label: "Mail".into(),
                value: "true".into(),
                checked: true,
            }]
        );
        assert!(matches!(
            form.elements.last(),
            Some(FormElement::CheckboxGroup { help: Some(help), .. }) if help == "Sent on save"
        ));
        assert_eq!(form.defaults["mail"], None);
    }

    #[tokio::test]
    async fn css_is_optional() {
        let root = tempfile::tempdir().unwrap();
        let ctx = context(root.path(), Vec::new());
        assert_eq!(ctx.get_css().await.unwrap(), None);

        let dir = root.path().join("notify").join("resources");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("notify.css"), ".notify { color: red; }").unwrap();
        assert_eq!(
            ctx.get_css().await.unwrap().as_deref(),
            Some(".notify { color: red; }")
        );
    }

    #[tokio::test]
    async fn save_settings_stores_declared_fields_only() {
        let root = tempfile::tempdir().unwrap();
        let db = init_memory_db().await.unwrap();
        let mut ctx = context(
            root.path(),
            vec![SettingsField::new("host", FieldKind::Text)],
        );

        let values = BTreeMap::from([
            ("host".to_string(), SettingValue::from("bbb.test")),
            ("rogue".to_string(), SettingValue::from("x")),
        ]);
        assert_eq!(ctx.save_settings(&db, &values).await.unwrap(), 1);

        let rows = ctx.get_settings(&db, true).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].variable, "notify_host");
        assert_eq!(
            ctx.get(&db, "host").await.unwrap(),
            Some(SettingValue::Text("bbb.test".into()))
        );
    }

    #[tokio::test]
    async fn enabled_only_when_installed() {
        let root = tempfile::tempdir().unwrap();
        let db = init_memory_db().await.unwrap();
        let ctx = context(root.path(), Vec::new());
        assert!(!ctx.is_enabled(&db).await.unwrap());

        SettingsRepository::set_plugin_status("notify", "installed", 1, &db)
            .await
            .unwrap();
        assert!(ctx.is_enabled(&db).await.unwrap());

        SettingsRepository::set_plugin_status("notify", "uninstalled", 1, &db)
            .await
            .unwrap();
        assert!(!ctx.is_enabled(&db).await.unwrap());
    }
}
