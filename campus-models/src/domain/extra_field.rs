//! Custom field definition payloads.
//!
//! Column lengths are checked here; anything beyond that belongs to the
//! owner specific field tables.

use crate::{entities::extra_field, enums::extra_field::ExtraFieldType};
use chrono::Utc;
use sea_orm::{IntoActiveModel, Set};
use serde::Deserialize;
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Eq, Validate, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExtraField {
    pub field_type: ExtraFieldType,
    #[validate(length(min = 1, max = 64, message = "field variable length must be 1..=64"))]
    pub field_variable: String,
    #[validate(length(max = 64, message = "field display text length must be <= 64"))]
    pub field_display_text: Option<String>,
    pub field_default_value: Option<String>,
    pub field_order: Option<i32>,
    #[serde(default)]
    pub field_visible: bool,
    #[serde(default)]
    pub field_changeable: bool,
    #[serde(default)]
    pub field_filter: bool,
}

impl IntoActiveModel<extra_field::ActiveModel> for NewExtraField {
    fn into_active_model(self) -> extra_field::ActiveModel {
        extra_field::ActiveModel {
            field_type: Set(self.field_type),
            field_variable: Set(self.field_variable),
            field_display_text: Set(self.field_display_text),
            field_default_value: Set(self.field_default_value),
            field_order: Set(self.field_order),
            field_visible: Set(self.field_visible),
            field_changeable: Set(self.field_changeable),
            field_filter: Set(self.field_filter),
            tms: Set(Utc::now()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Validate, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExtraField {
    pub id: i32,
    pub field_type: ExtraFieldType,
    #[validate(length(min = 1, max = 64, message = "field variable length must be 1..=64"))]
    pub field_variable: String,
    #[validate(length(max = 64, message = "field display text length must be <= 64"))]
    pub field_display_text: Option<String>,
    pub field_default_value: Option<String>,
    pub field_order: Option<i32>,
    pub field_visible: bool,
    pub field_changeable: bool,
    pub field_filter: bool,
}

impl IntoActiveModel<extra_field::ActiveModel> for UpdateExtraField {
    fn into_active_model(self) -> extra_field::ActiveModel {
        extra_field::ActiveModel {
            id: Set(self.id),
            field_type: Set(self.field_type),
            field_variable: Set(self.field_variable),
            field_display_text: Set(self.field_display_text),
            field_default_value: Set(self.field_default_value),
            field_order: Set(self.field_order),
            field_visible: Set(self.field_visible),
            field_changeable: Set(self.field_changeable),
            field_filter: Set(self.field_filter),
            tms: Set(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewExtraField {
        NewExtraField {
            field_type: ExtraFieldType::Text,
            field_variable: "nickname".into(),
            field_display_text: Some("Nickname".into()),
            field_default_value: None,
            field_order: Some(1),
            field_visible: true,
            field_changeable: true,
            field_filter: false,
        }
    }

    #[test]
    fn accepts_schema_sized_values() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn rejects_overlong_variable() {
        let mut field = sample();
        field.field_variable = "x".repeat(65);
        assert!(field.validate().is_err());
    }

    #[test]
    fn rejects_empty_variable() {
        let mut field = sample();
        field.field_variable.clear();
        assert!(field.validate().is_err());
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let field: NewExtraField = serde_json::from_str(
            r#"{"fieldType":4,"fieldVariable":"level","fieldDisplayText":null,
                "fieldDefaultValue":"a","fieldOrder":null,"fieldFilter":true}"#,
        )
        .unwrap();
        assert_eq!(field.field_type, ExtraFieldType::Select);
        assert!(field.field_filter);
        assert!(!field.field_visible);
    }
}
