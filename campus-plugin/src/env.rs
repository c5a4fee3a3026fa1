use campus_models::settings::Settings;
use std::{fmt, path::PathBuf, sync::Arc};

/// Platform wide string lookup, the last step of plugin localization
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Translator that echoes the key back
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// What a plugin needs to know about the platform it runs in.
#[derive(Clone)]
pub struct PluginEnv {
    /// Current multi-tenant scope
    pub access_url: i32,
    /// Directory holding one sub directory per plugin
    pub plugin_root: PathBuf,
    /// Public web root, ends with `/`
    pub web_path: String,
    /// ISO code of the active interface language
    pub language: String,
    pub parent_language: Option<String>,
    pub translator: Arc<dyn Translator>,
}

impl PluginEnv {
    pub fn from_settings(settings: &Settings) -> Self {
        PluginEnv {
            access_url: settings.general.access_url,
            plugin_root: PathBuf::from(&settings.general.plugin_dir),
            web_path: settings.general.web_path.clone(),
            language: settings.i18n.language.clone(),
            parent_language: settings.i18n.parent_language.clone(),
            translator: Arc::new(KeyTranslator),
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }
}

impl fmt::Debug for PluginEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginEnv")
            .field("access_url", &self.access_url)
            .field("plugin_root", &self.plugin_root)
            .field("web_path", &self.web_path)
            .field("language", &self.language)
            .field("parent_language", &self.parent_language)
            .finish_non_exhaustive()
    }
}
