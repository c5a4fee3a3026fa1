use sea_orm::{DeriveActiveEnum, EnumIter};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt::{Display, Error, Formatter};

/// Widget kind of a custom field, persisted as its integer code.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize_repr,
    Deserialize_repr,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[repr(i32)]
pub enum ExtraFieldType {
    Text = 1,
    Textarea = 2,
    Radio = 3,
    Select = 4,
    SelectMultiple = 5,
    Date = 6,
    Datetime = 7,
    DoubleSelect = 8,
    Divider = 9,
    Tag = 10,
    Timezone = 11,
    SocialProfile = 12,
    Checkbox = 13,
    MobilePhoneNumber = 14,
}

impl ExtraFieldType {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtraFieldType::Text => "text",
            ExtraFieldType::Textarea => "textarea",
            ExtraFieldType::Radio => "radio",
            ExtraFieldType::Select => "select",
            ExtraFieldType::SelectMultiple => "select_multiple",
            ExtraFieldType::Date => "date",
            ExtraFieldType::Datetime => "datetime",
            ExtraFieldType::DoubleSelect => "double_select",
            ExtraFieldType::Divider => "divider",
            ExtraFieldType::Tag => "tag",
            ExtraFieldType::Timezone => "timezone",
            ExtraFieldType::SocialProfile => "social_profile",
            ExtraFieldType::Checkbox => "checkbox",
            ExtraFieldType::MobilePhoneNumber => "mobile_phone_number",
        }
    }

    /// Whether the field offers a fixed list of choices.
    #[inline]
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            ExtraFieldType::Radio
                | ExtraFieldType::Select
                | ExtraFieldType::SelectMultiple
                | ExtraFieldType::DoubleSelect
                | ExtraFieldType::Checkbox
        )
    }
}

impl Display for ExtraFieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ExtraFieldType::Text.to_value(), 1);
        assert_eq!(ExtraFieldType::MobilePhoneNumber.to_value(), 14);
        assert_eq!(
            ExtraFieldType::try_from_value(&4).ok(),
            Some(ExtraFieldType::Select)
        );
        assert!(ExtraFieldType::try_from_value(&99).is_err());
    }

    #[test]
    fn serializes_as_integer() {
        let json = serde_json::to_string(&ExtraFieldType::Tag).unwrap();
        assert_eq!(json, "10");
        let back: ExtraFieldType = serde_json::from_str("3").unwrap();
        assert_eq!(back, ExtraFieldType::Radio);
    }
}
