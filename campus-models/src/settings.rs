use crate::constants::{DATA_DIR, PLUGIN_DIR};
use campus_error::CPResult;
use config::{Config, File};
use serde::{self, Deserialize};
use std::{ops::Deref, sync::Arc};

#[derive(Debug, Clone)]
pub struct Settings(Arc<Inner>);

impl Deref for Settings {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Settings {
    pub fn new(config_path: String) -> CPResult<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(config_path.as_str()).required(false))
            .add_source(
                config::Environment::with_prefix("CP")
                    .separator("__")
                    .try_parsing(true),
            );
        let inner: Inner = builder.build()?.try_deserialize()?;
        Ok(Self(Arc::new(inner)))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self(Arc::new(Inner::default()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inner {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub i18n: I18n,
    #[serde(default)]
    pub db: Db,
}

#[derive(Debug, Clone, Deserialize)]
pub struct General {
    /// Console and file log level (`trace` .. `error`).
    #[serde(default = "General::log_level_default")]
    pub log_level: String,
    /// Multi-tenant scope id that plugin settings are read and written under.
    #[serde(default = "General::access_url_default")]
    pub access_url: i32,
    /// Root directory holding one sub directory per plugin
    /// (`<plugin_dir>/<name>/{plugin.json, lang/, resources/}`).
    #[serde(default = "General::plugin_dir_default")]
    pub plugin_dir: String,
    /// Public web root of the platform, used to build plugin urls.
    #[serde(default = "General::web_path_default")]
    pub web_path: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            log_level: General::log_level_default(),
            access_url: General::access_url_default(),
            plugin_dir: General::plugin_dir_default(),
            web_path: General::web_path_default(),
        }
    }
}

impl General {
    fn log_level_default() -> String {
        "info".into()
    }

    fn access_url_default() -> i32 {
        1
    }

    fn plugin_dir_default() -> String {
        PLUGIN_DIR.into()
    }

    fn web_path_default() -> String {
        "http://localhost/".into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct I18n {
    /// ISO code of the active interface language.
    #[serde(default = "I18n::language_default")]
    pub language: String,
    /// ISO code of the language `language` derives from, if any.
    #[serde(default)]
    pub parent_language: Option<String>,
}

impl Default for I18n {
    fn default() -> Self {
        I18n {
            language: I18n::language_default(),
            parent_language: None,
        }
    }
}

impl I18n {
    fn language_default() -> String {
        "en".into()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Db {
    #[serde(default)]
    pub sqlite: Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sqlite {
    #[serde(default = "Sqlite::path_default")]
    pub path: String,
    #[serde(default = "Sqlite::timeout_default")]
    pub timeout: u64,
    #[serde(default = "Sqlite::idle_timeout_default")]
    pub idle_timeout: u64,
    #[serde(default = "Sqlite::max_lifetime_default")]
    pub max_lifetime: u64,
    #[serde(default = "Sqlite::max_connections_default")]
    pub max_connections: u32,
    #[serde(default = "Sqlite::auto_create_default")]
    pub auto_create: bool,
}

impl Default for Sqlite {
    fn default() -> Self {
        Sqlite {
            path: Sqlite::path_default(),
            timeout: Sqlite::timeout_default(),
            idle_timeout: Sqlite::idle_timeout_default(),
            max_lifetime: Sqlite::max_lifetime_default(),
            max_connections: Sqlite::max_connections_default(),
            auto_create: Sqlite::auto_create_default(),
        }
    }
}

impl Sqlite {
    pub fn db_path(&self) -> String {
        format!("{}/{}", DATA_DIR, self.path)
    }

    pub fn to_url(&self) -> String {
        if self.auto_create {
            // mode=rwc creates the file when missing
            format!("sqlite:{}?mode=rwc", self.db_path())
        } else {
            format!("sqlite:{}", self.db_path())
        }
    }

    fn path_default() -> String {
        "campus.db".into()
    }

    fn timeout_default() -> u64 {
        5000
    }

    fn idle_timeout_default() -> u64 {
        5000
    }

    fn max_lifetime_default() -> u64 {
        5000
    }

    fn max_connections_default() -> u32 {
        16
    }

    fn auto_create_default() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::new("does-not-exist/campus".into()).unwrap();
        assert_eq!(settings.general.access_url, 1);
        assert_eq!(settings.i18n.language, "en");
        assert!(settings.i18n.parent_language.is_none());
        assert_eq!(settings.db.sqlite.to_url(), "sqlite:./data/campus.db?mode=rwc");
    }

    #[test]
    fn reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus.toml");
        std::fs::write(
            &path,
            "[general]\naccess_url = 3\nweb_path = \"https://lms.example/\"\n\n\
             [i18n]\nlanguage = \"es\"\nparent_language = \"en\"\n",
        )
        .unwrap();

        let settings = Settings::new(path.to_string_lossy().to_string()).unwrap();
        assert_eq!(settings.general.access_url, 3);
        assert_eq!(settings.general.web_path, "https://lms.example/");
        assert_eq!(settings.i18n.language, "es");
        assert_eq!(settings.i18n.parent_language.as_deref(), Some("en"));
    }
}
