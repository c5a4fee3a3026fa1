use crate::{
    constants::{TABS_VARIABLE, TAB_CATEGORY, TAB_SETTING_TYPE},
    entities::settings_current,
};
use sea_orm::{IntoActiveModel, Set};

/// Navigation tab stored as a `show_tabs` settings row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTab {
    /// `custom_tab_<n>` plus an optional student filter suffix
    pub subkey: String,
    /// Display title
    pub title: String,
    /// Target url, stored in `comment`
    pub url: String,
    /// `Tabs<title without whitespace>`, used for duplicate detection
    pub subkeytext: String,
}

impl IntoActiveModel<settings_current::ActiveModel> for NewTab {
    fn into_active_model(self) -> settings_current::ActiveModel {
        settings_current::ActiveModel {
            variable: Set(TABS_VARIABLE.into()),
            subkey: Set(Some(self.subkey)),
            setting_type: Set(Some(TAB_SETTING_TYPE.into())),
            category: Set(Some(TAB_CATEGORY.into())),
            selected_value: Set(Some("true".into())),
            title: Set(self.title),
            comment: Set(Some(self.url)),
            subkeytext: Set(Some(self.subkeytext)),
            access_url: Set(1),
            access_url_changeable: Set(0),
            access_url_locked: Set(0),
            ..Default::default()
        }
    }
}

/// Partial update of a tab row; `None` leaves the column untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabUpdate {
    pub subkey: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub selected_value: Option<String>,
}

impl TabUpdate {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subkey.is_none()
            && self.title.is_none()
            && self.url.is_none()
            && self.selected_value.is_none()
    }
}
