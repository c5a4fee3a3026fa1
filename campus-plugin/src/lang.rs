use campus_error::{plugin::PluginError, CPResult};
use std::{collections::HashMap, io::ErrorKind, path::Path};
use tracing::debug;

pub(crate) type Strings = HashMap<String, String>;

const BASE_LANGUAGE: &str = "en";

/// Build a plugin string table from `<dir>/<iso>.json` files: English first,
/// then the active language merged over it, or the parent language when the
/// active one has no file.
pub(crate) async fn load(dir: &Path, language: &str, parent: Option<&str>) -> CPResult<Strings> {
    let mut strings = Strings::new();
    overlay(&mut strings, dir, BASE_LANGUAGE).await?;

    if !overlay(&mut strings, dir, language).await? {
        if let Some(parent) = parent {
            overlay(&mut strings, dir, parent).await?;
        }
    }
    Ok(strings)
}

async fn overlay(strings: &mut Strings, dir: &Path, iso: &str) -> CPResult<bool> {
    let path = dir.join(format!("{iso}.json"));
    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    let table: Strings = serde_json::from_str(&raw)
        .map_err(|e| PluginError::Lang(format!("{}: {e}", path.display())))?;
    debug!(file = %path.display(), entries = table.len(), "Loaded plugin strings");
    strings.extend(table);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, iso: &str, body: &str) {
        std::fs::write(dir.join(format!("{iso}.json")), body).unwrap();
    }

    #[tokio::test]
    async fn active_language_overrides_english() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en", r#"{"a": "A-en", "b": "B-en"}"#);
        write(dir.path(), "fr", r#"{"b": "B-fr"}"#);

        let strings = load(dir.path(), "fr", None).await.unwrap();
        assert_eq!(strings["a"], "A-en");
        assert_eq!(strings["b"], "B-fr");
    }

    #[tokio::test]
    async fn parent_used_only_without_active_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en", r#"{"a": "A-en"}"#);
        write(dir.path(), "es", r#"{"a": "A-es"}"#);

        let strings = load(dir.path(), "es_ar", Some("es")).await.unwrap();
        assert_eq!(strings["a"], "A-es");

        write(dir.path(), "es_ar", r#"{}"#);
        let strings = load(dir.path(), "es_ar", Some("es")).await.unwrap();
        assert_eq!(strings["a"], "A-en");
    }

    #[tokio::test]
    async fn missing_directory_is_empty_and_bad_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("none"), "fr", None)
            .await
            .unwrap()
            .is_empty());

        write(dir.path(), "en", "not json");
        assert!(load(dir.path(), "en", None).await.is_err());
    }
}
