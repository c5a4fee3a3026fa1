use serde::Serialize;
use serde_json::Value;

/// Decoded `selected_value` of a plugin setting.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Text(String),
    /// JSON array or object
    Compound(Value),
}

impl SettingValue {
    /// Decode a stored value; only JSON arrays and objects become compound.
    pub fn decode(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            if let Ok(value @ (Value::Array(_) | Value::Object(_))) =
                serde_json::from_str::<Value>(raw)
            {
                return SettingValue::Compound(value);
            }
        }
        SettingValue::Text(raw.to_string())
    }

    /// Storage form of the value
    pub fn encode(&self) -> String {
        match self {
            SettingValue::Text(text) => text.clone(),
            SettingValue::Compound(value) => value.to_string(),
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(text) => Some(text),
            SettingValue::Compound(_) => None,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<Value> for SettingValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => SettingValue::Text(text),
            Value::Array(_) | Value::Object(_) => SettingValue::Compound(value),
            other => SettingValue::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arrays_and_objects_are_compound() {
        assert_eq!(
            SettingValue::decode(r#"["sms","mail"]"#),
            SettingValue::Compound(json!(["sms", "mail"]))
        );
        assert_eq!(
            SettingValue::decode(r#"{"a":1}"#),
            SettingValue::Compound(json!({"a": 1}))
        );
    }

    #[test]
    fn scalars_and_broken_json_stay_text() {
        assert_eq!(SettingValue::decode("42"), SettingValue::Text("42".into()));
        assert_eq!(SettingValue::decode("true"), SettingValue::Text("true".into()));
        assert_eq!(SettingValue::decode("[oops"), SettingValue::Text("[oops".into()));
        assert_eq!(SettingValue::decode(""), SettingValue::Text(String::new()));
    }

    #[test]
    fn json_values_map_to_storage_text() {
        assert_eq!(SettingValue::from(json!("x")).encode(), "x");
        assert_eq!(SettingValue::from(json!(true)).encode(), "true");
        assert_eq!(SettingValue::from(json!([1, 2])).encode(), "[1,2]");
    }
}
