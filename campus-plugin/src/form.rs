//! Declarative settings fields and the form descriptor built from them.

use crate::value::SettingValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field whose help text links to the plugin index page
pub const SHOW_MAIN_MENU_TAB: &str = "show_main_menu_tab";
/// Name of the single save button
pub const SUBMIT_BUTTON: &str = "submit_button";
/// Label key of the shared checkbox group
pub const CHECKBOX_GROUP_LABEL: &str = "sms_types";

/// One declared plugin option; `name` is the option name under the plugin.
/// A declaration without `type` is a text field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSettingsField")]
pub struct SettingsField {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl SettingsField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        SettingsField {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Deserialize)]
struct RawSettingsField {
    name: String,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

impl TryFrom<RawSettingsField> for SettingsField {
    type Error = serde_json::Error;

    fn try_from(raw: RawSettingsField) -> Result<Self, Self::Error> {
        let mut rest = raw.rest;
        rest.entry("type")
            .or_insert_with(|| serde_json::Value::from("text"));
        let kind = serde_json::from_value(serde_json::Value::Object(rest))?;
        Ok(SettingsField {
            name: raw.name,
            kind,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Static block, labelled by the translated option name
    Html,
    Wysiwyg,
    Text,
    /// Yes / no radio pair storing `true` / `false`
    Boolean,
    /// Member of the shared checkbox group
    Checkbox,
    Select {
        options: Vec<SelectOption>,
        #[serde(default)]
        attributes: BTreeMap<String, String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Checkbox {
    pub name: String,
    pub label: String,
    pub value: String,
    pub checked: bool,
}

/// Element of a rendered settings form, in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum FormElement {
    Html {
        content: String,
    },
    HtmlEditor {
        name: String,
        label: String,
    },
    Text {
        name: String,
        label: String,
        help: Option<String>,
    },
    RadioGroup {
        name: String,
        label: String,
        help: Option<String>,
        choices: Vec<Choice>,
    },
    Select {
        name: String,
        label: String,
        help: Option<String>,
        options: Vec<SelectOption>,
        attributes: BTreeMap<String, String>,
    },
    CheckboxGroup {
        label: String,
        help: Option<String>,
        checkboxes: Vec<Checkbox>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmitButton {
    pub name: String,
    pub label: String,
}

/// Settings form handed to the rendering layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SettingsForm {
    /// Form id, the plugin name
    pub name: String,
    pub elements: Vec<FormElement>,
    /// Current value per declared option; `None` when never saved
    pub defaults: BTreeMap<String, Option<SettingValue>>,
    pub submit: SubmitButton,
}

impl SettingsForm {
    pub fn element(&self, name: &str) -> Option<&FormElement> {
        self.elements.iter().find(|element| match element {
            FormElement::HtmlEditor { name: n, .. }
            | FormElement::Text { name: n, .. }
            | FormElement::RadioGroup { name: n, .. }
            | FormElement::Select { name: n, .. } => n == name,
            FormElement::Html { .. } | FormElement::CheckboxGroup { .. } => false,
        })
    }

    pub fn checkbox_group(&self) -> Option<&[Checkbox]> {
        self.elements.iter().find_map(|element| match element {
            FormElement::CheckboxGroup { checkboxes, .. } => Some(checkboxes.as_slice()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_kinds_parse_from_tagged_json() {
        let fields: Vec<SettingsField> = serde_json::from_str(
            r#"[
                {"name": "intro", "type": "html"},
                {"name": "notify", "type": "checkbox"},
                {"name": "level", "type": "select",
                 "options": [{"value": "a", "label": "Alpha"}],
                 "attributes": {"multiple": "multiple"}}
            ]"#,
        )
        .unwrap();

        assert_eq!(fields[0].kind, FieldKind::Html);
        assert_eq!(fields[1].kind, FieldKind::Checkbox);
        match &fields[2].kind {
            FieldKind::Select {
                options,
                attributes,
            } => {
                assert_eq!(options, &vec![SelectOption::new("a", "Alpha")]);
                assert_eq!(attributes.get("multiple").map(String::as_str), Some("multiple"));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn untyped_field_is_text() {
        let field: SettingsField = serde_json::from_str(r#"{"name": "host"}"#).unwrap();

        assert_eq!(field, SettingsField::new("host", FieldKind::Text));
    }

    #[test]
    fn select_without_options_is_rejected() {
        assert!(serde_json::from_str::<SettingsField>(r#"{"name": "x", "type": "select"}"#).is_err());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(serde_json::from_str::<SettingsField>(r#"{"name": "x", "type": "color"}"#).is_err());
    }
}
